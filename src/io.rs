use crate::model::Appointment;
use crate::parser::LayoutOptions;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Fournit les lignes brutes de la grille (fichier, stdin, HTTP).
pub trait LineSource {
    fn read_lines(&self) -> Result<Vec<String>>;
    /// Libellé pour les logs.
    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSource for FileSource {
    fn read_lines(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(split_lines(&text))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl LineSource for StdinSource {
    fn read_lines(&self) -> Result<Vec<String>> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(split_lines(&text))
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}

/// Téléchargement bloquant (feature `http`). Un statut autre que 200 est une erreur.
#[cfg(feature = "http")]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http")]
impl LineSource for HttpSource {
    fn read_lines(&self) -> Result<Vec<String>> {
        let response = reqwest::blocking::get(&self.url)
            .with_context(|| format!("downloading {}", self.url))?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            anyhow::bail!("downloading {}: status code {}", self.url, status);
        }
        let text = response
            .text()
            .with_context(|| format!("decoding body of {}", self.url))?;
        Ok(split_lines(&text))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// `-` pour stdin, une URL `http(s)://`, sinon un chemin de fichier.
pub fn open_source(input: &str) -> Result<Box<dyn LineSource>> {
    if input == "-" {
        return Ok(Box::new(StdinSource));
    }
    if input.starts_with("http://") || input.starts_with("https://") {
        #[cfg(feature = "http")]
        return Ok(Box::new(HttpSource::new(input)));
        #[cfg(not(feature = "http"))]
        anyhow::bail!("{input}: HTTP input needs the `http` feature");
    }
    Ok(Box::new(FileSource::new(input)))
}

/// Découpe en lignes en tolérant `\r\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Charge une géométrie depuis JSON ; les champs absents prennent leur valeur par défaut.
pub fn load_layout_json<P: AsRef<Path>>(path: P) -> Result<LayoutOptions> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading layout {}", path.display()))?;
    let layout: LayoutOptions = serde_json::from_slice(&data)
        .with_context(|| format!("parsing layout {}", path.display()))?;
    Ok(layout)
}

/// Export JSON des rendez-vous (jolie mise en forme)
pub fn export_appointments_json<P: AsRef<Path>>(path: P, appointments: &[Appointment]) -> Result<()> {
    let s = serde_json::to_string_pretty(appointments)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV : header `date,start_time,end_time,name`
pub fn export_appointments_csv<P: AsRef<Path>>(path: P, appointments: &[Appointment]) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    for app in appointments {
        w.serialize(app)?;
    }
    w.flush()?;
    Ok(())
}

/// Relit un export CSV (header `date,start_time,end_time,name`).
pub fn import_appointments_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Appointment>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let app: Appointment = rec.context("invalid appointment row")?;
        out.push(app);
    }
    Ok(out)
}
