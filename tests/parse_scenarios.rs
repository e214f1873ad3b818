#![forbid(unsafe_code)]
use agenda_rooster::parser::MAX_LINE_WIDTH;
use agenda_rooster::{parse_agenda, Appointment, LayoutOptions, ParseError, Parser};

fn layout() -> LayoutOptions {
    LayoutOptions {
        year: 2025,
        ..LayoutOptions::default()
    }
}

/// Ligne au format par défaut : marge 7, 7 jours de 27, marge 6.
fn line(left: &str, days: &[&str], right: &str) -> String {
    let mut s = format!("{left:<7}");
    for day in days {
        s.push_str(&format!("{day:<27}"));
    }
    if !right.is_empty() {
        for _ in days.len()..7 {
            s.push_str(&" ".repeat(27));
        }
        s.push_str(right);
    }
    s
}

fn app(date: &str, start: &str, end: &str, name: &str) -> Appointment {
    Appointment {
        date: date.into(),
        start_time: start.into(),
        end_time: end.into(),
        name: name.into(),
    }
}

#[test]
fn scenario_a_single_appointment() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("-", &["Jansen"], ""),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(apps, vec![app("03/06", "09:00", "09:30", "Jansen")]);
}

#[test]
fn scenario_b_quarter_without_followup_is_whole_hour() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("15", &["Devries"], ""),
        line("30", &[], ""),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(apps, vec![app("03/06", "09:00", "09:30", "Devries")]);
}

#[test]
fn scenario_c_quarter_kept_when_thirty_has_names() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("15", &["Devries"], ""),
        line("30", &["Peters"], ""),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(
        apps,
        vec![
            app("03/06", "09:15", "09:45", "Devries"),
            app("03/06", "09:30", "10:00", "Peters"),
        ]
    );
}

#[test]
fn scenario_d_bad_header_date_only_skips_that_cell() {
    let lines = vec![
        line("", &["99/99", "04/06"], ""),
        line("09:00", &[], ""),
        line("", &["Jansen", "Peters"], ""),
        line("10:00", &[], ""),
        line("", &["", "Bakker"], ""),
    ];
    let report = Parser::new(layout()).parse(&lines).unwrap();
    assert_eq!(
        report.appointments,
        vec![
            app("04/06", "09:00", "09:30", "Peters"),
            app("04/06", "10:00", "10:30", "Bakker"),
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    let cell = &report.skipped[0];
    assert_eq!((cell.row, cell.column, cell.text.as_str()), (2, 0, "Jansen"));
    assert!(matches!(cell.error, ParseError::DateTimeParse { .. }));
}

#[test]
fn scenario_e_no_header() {
    let lines = vec![line("09:00", &[], ""), line("", &["Jansen"], "")];
    let err = parse_agenda(&lines, &layout()).unwrap_err();
    assert!(matches!(err, ParseError::NoHeaderFound));
}

#[test]
fn forty_five_maps_to_half_hour_without_followup() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("14:00", &[], ""),
        line("45", &["Smit"], ""),
        line("15:00", &[], ""),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(apps, vec![app("03/06", "14:30", "15:00", "Smit")]);
}

#[test]
fn markers_in_right_margin() {
    let lines = vec![
        line("", &["03/06", "04/06"], ""),
        line("", &[], "11:00"),
        line("", &["", "Visser"], "30"),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(apps, vec![app("04/06", "11:30", "12:00", "Visser")]);
}

#[test]
fn preamble_and_rows_before_first_hour_are_ignored() {
    let lines = vec![
        "Agenda week 23".to_string(),
        line("", &["02/06", "03/06"], ""),
        line("", &["Niemand"], ""),
        line("15", &["Ook niet"], ""),
        line("08:00", &[], ""),
        line("", &["Mulder", "de Boer"], ""),
    ];
    let report = Parser::new(layout()).parse(&lines).unwrap();
    assert_eq!(report.header_index, 1);
    assert_eq!(
        report.appointments,
        vec![
            app("02/06", "08:00", "08:30", "Mulder"),
            app("03/06", "08:00", "08:30", "de Boer"),
        ]
    );
}

#[test]
fn numeric_and_time_cells_are_not_names() {
    let lines = vec![
        line("", &["03/06", "04/06", "05/06"], ""),
        line("09:00", &[], ""),
        line("", &["12", "09:30", "45"], ""),
    ];
    let report = Parser::new(layout()).parse(&lines).unwrap();
    assert!(report.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn empty_result_is_not_an_error() {
    let lines = vec![line("", &["03/06"], "")];
    let report = Parser::new(layout()).parse(&lines).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.dates[0].as_deref(), Some("03/06"));
}

#[test]
fn quarter_persists_until_next_hour() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("30", &["A"], ""),
        line("", &["B"], ""),
        line("10:00", &[], ""),
        line("", &["C"], ""),
    ];
    let starts: Vec<_> = parse_agenda(&lines, &layout())
        .unwrap()
        .into_iter()
        .map(|a| a.start_time)
        .collect();
    assert_eq!(starts, vec!["09:30", "09:30", "10:00"]);
}

#[test]
fn invalid_layout_is_rejected() {
    let opts = LayoutOptions {
        num_days: 0,
        ..layout()
    };
    let err = parse_agenda(Vec::<String>::new(), &opts).unwrap_err();
    assert!(matches!(err, ParseError::InvalidLayout(_)));
}

#[test]
fn overflowing_layout_is_rejected_before_slicing() {
    let opts = LayoutOptions {
        day_width: usize::MAX / 2,
        num_days: 3,
        ..layout()
    };
    let err = parse_agenda(vec!["      03/06"], &opts).unwrap_err();
    assert!(matches!(err, ParseError::InvalidLayout(_)));

    let opts = LayoutOptions {
        day_width: MAX_LINE_WIDTH,
        ..layout()
    };
    let err = parse_agenda(vec!["      03/06"], &opts).unwrap_err();
    assert!(matches!(err, ParseError::InvalidLayout(_)));
}

#[test]
fn plain_rows_after_empty_fifteen_fall_back_to_whole_hour() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("15", &[], ""),
        line("", &["A"], ""),
        line("", &["B"], ""),
    ];
    let starts: Vec<_> = parse_agenda(&lines, &layout())
        .unwrap()
        .into_iter()
        .map(|a| (a.name, a.start_time))
        .collect();
    assert_eq!(
        starts,
        vec![("A".to_string(), "09:00".to_string()), ("B".to_string(), "09:00".to_string())]
    );
}

#[test]
fn plain_row_keeps_fifteen_when_thirty_row_has_names() {
    let lines = vec![
        line("", &["03/06"], ""),
        line("09:00", &[], ""),
        line("15", &[], ""),
        line("", &["A"], ""),
        line("30", &["C"], ""),
    ];
    let apps = parse_agenda(&lines, &layout()).unwrap();
    assert_eq!(
        apps,
        vec![
            app("03/06", "09:15", "09:45", "A"),
            app("03/06", "09:30", "10:00", "C"),
        ]
    );
}
