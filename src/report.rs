//! Structured diagnostics.
//!
//! Nothing in this crate aborts a batch because one map or one texture failed. Failures, and
//! progress worth mentioning, are handed to a [`Reporter`] instead. Hand it a
//! `Vec<Diagnostic>` to collect them, a [`TracingReporter`] to log them, or wrap a closure in a
//! [`Callback`] to forward them anywhere else.

use std::fmt;
use std::path::{Path, PathBuf};

/// How bad a [`Diagnostic`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Progress.
    Info,
    /// One item was skipped; everything else carries on.
    Warning,
    /// A whole input or output file was lost.
    Error,
}

/// A single message with optional file and texture context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub path: Option<PathBuf>,
    pub texture: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            path: None,
            texture: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attaches the file the message is about.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_owned());
        self
    }

    /// Attaches the texture the message is about.
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let severity = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(fmt, "{}: ", severity)?;
        if let Some(path) = &self.path {
            write!(fmt, "{}: ", path.display())?;
        }
        if let Some(texture) = &self.texture {
            write!(fmt, "[{}] ", texture)?;
        }
        write!(fmt, "{}", self.message)
    }
}

/// Receives [`Diagnostic`]s.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Adapts a closure into a [`Reporter`].
pub struct Callback<F>(pub F);

impl<F: FnMut(Diagnostic)> Reporter for Callback<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic);
    }
}

/// Forwards diagnostics to [`tracing`], with the path and texture as fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            message,
            path,
            texture,
        } = diagnostic;
        let path = path.as_deref().map(Path::display);
        let path = tracing::field::display(OptionDisplay(path));
        let texture = texture.as_deref().unwrap_or("");

        match severity {
            Severity::Info => tracing::info!(%path, texture, "{}", message),
            Severity::Warning => tracing::warn!(%path, texture, "{}", message),
            Severity::Error => tracing::error!(%path, texture, "{}", message),
        }
    }
}

struct OptionDisplay<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OptionDisplay<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(fmt),
            None => Ok(()),
        }
    }
}

/// Counts warnings and errors on their way to another reporter.
pub struct Tally<R> {
    inner: R,
    warnings: usize,
    errors: usize,
}

impl<R: Reporter> Tally<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            warnings: 0,
            errors: 0,
        }
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl<R: Reporter> Reporter for Tally<R> {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => {}
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }
        self.inner.report(diagnostic);
    }
}
