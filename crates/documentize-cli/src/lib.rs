//! CLI logic for the Documentize preprocessor.
//!
//! [`run`] documents every input component and collects the outcome per file,
//! so one broken component does not stop the others.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::{debug, info, warn};

use documentize::{DocumentizeError, Preprocessor, ProcessedMarkup, TypeSession};

/// A component that could not be documented.
#[derive(Debug)]
pub struct FileFailure {
    pub path: String,
    pub error: DocumentizeError,
}

/// What happened to each input.
#[derive(Debug, Default)]
pub struct Summary {
    pub patched: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the Documentize CLI application
///
/// Loads the configuration, registers the shared declaration files, then
/// preprocesses every input. Patched components are written to
/// `args.out_dir` under their file name, or to stdout.
///
/// # Errors
///
/// Returns `DocumentizeError` only for problems that affect every input:
/// - Configuration loading or validation errors
/// - Unreadable or malformed declaration files
///
/// Per-file errors are collected in [`Summary::failures`].
pub fn run(args: &Args) -> Result<Summary, DocumentizeError> {
    let config = config::load_config(args.config.as_ref())?;
    let debug = config.debug() || args.debug;
    let mut preprocessor = Preprocessor::with_defaults(config.with_debug(debug))?;

    for path in &args.declarations {
        let source = fs::read_to_string(path)?;
        preprocessor.session_mut().create_unit(path, &source)?;
        info!(path; "Registered declaration file");
    }

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)?;
    }

    let mut summary = Summary::default();
    for input in &args.inputs {
        debug!(input; "Processing component");
        match process_file(&mut preprocessor, input, args.out_dir.as_deref()) {
            Ok(true) => summary.patched.push(input.clone()),
            Ok(false) => {
                info!(input; "Component left unchanged");
                summary.skipped.push(input.clone());
            }
            Err(error) => {
                warn!(input; "Failed to document component");
                summary.failures.push(FileFailure {
                    path: input.clone(),
                    error,
                });
            }
        }
    }

    info!(
        patched = summary.patched.len(),
        skipped = summary.skipped.len(),
        failed = summary.failures.len();
        "Finished"
    );
    Ok(summary)
}

/// Documents one component. Returns whether it was patched.
fn process_file(
    preprocessor: &mut Preprocessor,
    input: &str,
    out_dir: Option<&str>,
) -> Result<bool, DocumentizeError> {
    let content = fs::read_to_string(input)?;

    let code = match preprocessor.markup(&content, input)? {
        ProcessedMarkup::Patched { code, .. } => code,
        ProcessedMarkup::Skipped => return Ok(false),
    };

    match out_dir {
        Some(out_dir) => {
            let file_name = Path::new(input)
                .file_name()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input has no file name"))?;
            let output = Path::new(out_dir).join(file_name);
            fs::write(&output, code)?;
            info!(output = output.display().to_string(); "Component documented");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(true)
}
