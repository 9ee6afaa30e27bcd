//! The markup preprocessor.
//!
//! For every component carrying the marker tag, the preprocessor resolves
//! the declared events, props and slots, renders them as Markdown and
//! replaces the tag with a `@component` documentation comment.

use log::{debug, info};

use documentize_parser::{MetaTag, extract_scripts, locate_meta_tag};

use crate::{
    assemble::render_markdown,
    config::Config,
    error::DocumentizeError,
    extract::{ComponentConfig, extract_metadata},
    logger::{LogReporter, Logger, Reporter},
    metadata::Metadata,
    resolver::SymbolResolver,
    session::{Project, TypeSession, unique_unit_name},
};

/// The result of preprocessing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedMarkup {
    /// The file was left untouched.
    Skipped,
    /// The marker tag was replaced.
    Patched { code: String, metadata: Metadata },
}

impl ProcessedMarkup {
    /// The patched source, or `None` when the file should stay as it is.
    pub fn into_code(self) -> Option<String> {
        match self {
            ProcessedMarkup::Skipped => None,
            ProcessedMarkup::Patched { code, .. } => Some(code),
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            ProcessedMarkup::Skipped => None,
            ProcessedMarkup::Patched { metadata, .. } => Some(metadata),
        }
    }

    pub fn is_patched(&self) -> bool {
        matches!(self, ProcessedMarkup::Patched { .. })
    }
}

/// Wraps rendered Markdown in a Svelte `@component` comment.
pub fn component_comment(markdown: &str) -> String {
    format!("<!--\n@component\n\n{}\n-->", markdown.trim())
}

/// Documents components in place.
///
/// # Examples
///
/// ```
/// use documentize::{Preprocessor, config::Config};
///
/// let mut preprocessor = Preprocessor::with_defaults(Config::default()).unwrap();
///
/// let content = r#"<script lang="ts">
///   interface $$Events { click: MouseEvent }
/// </script>
/// <meta data-documentize data-description="A button" />"#;
///
/// let code = preprocessor
///     .markup(content, "Button.svelte")
///     .unwrap()
///     .into_code()
///     .unwrap();
/// assert!(code.contains("@component\nA button"));
/// assert!(code.contains("| `click` |"));
/// ```
pub struct Preprocessor<S = Project, R = LogReporter> {
    config: Config,
    session: S,
    reporter: R,
}

impl Preprocessor {
    /// Creates a preprocessor with an empty [`Project`] reporting through `log`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentizeError::Config`] if the configuration is invalid.
    pub fn with_defaults(config: Config) -> Result<Self, DocumentizeError> {
        Self::new(config, Project::new(), LogReporter)
    }
}

impl<S: TypeSession, R: Reporter> Preprocessor<S, R> {
    /// Creates a preprocessor.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentizeError::Config`] if any configured data attribute
    /// is malformed.
    pub fn new(config: Config, session: S, reporter: R) -> Result<Self, DocumentizeError> {
        config.validate()?;
        debug!(config:?; "Global config");

        Ok(Self {
            config,
            session,
            reporter,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Mutable access to the session, for registering ambient declarations.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    fn logger(&self) -> Logger<'_> {
        Logger::new(&self.reporter, self.config.debug())
    }

    /// Processes one file.
    ///
    /// Files without the marker tag are skipped.
    ///
    /// # Errors
    ///
    /// Fails on malformed markup (duplicate attributes, several marker tags or
    /// script blocks), on unreadable declarations and on ambiguous symbols.
    pub fn markup(
        &mut self,
        content: &str,
        filename: &str,
    ) -> Result<ProcessedMarkup, DocumentizeError> {
        let marker = self.config.data_attributes().global();
        let tag = locate_meta_tag(content, marker)
            .map_err(|err| DocumentizeError::new_parse_error(err, content))?;

        let Some(tag) = tag else {
            self.logger()
                .warn(format!("Failed to find meta tag inside '{filename}'"));
            return Ok(ProcessedMarkup::Skipped);
        };

        info!(filename; "Documenting component");
        let metadata = self.extract_component_metadata(filename, content, &tag)?;
        self.patch_content(content, &tag, metadata)
    }

    /// Resolves the metadata of the component whose marker is `tag`.
    ///
    /// The script declarations are registered as a temporary unit that is
    /// removed again before returning, whatever the outcome.
    ///
    /// # Errors
    ///
    /// See [`Preprocessor::markup`].
    pub fn extract_component_metadata(
        &mut self,
        filename: &str,
        content: &str,
        tag: &MetaTag,
    ) -> Result<Metadata, DocumentizeError> {
        let component = ComponentConfig::resolve(&self.config, tag);
        self.logger().info(format!(
            "Patching '{filename}' based on provided config: events '{}', props '{}', slots '{}'",
            component.events(),
            component.props(),
            component.slots()
        ));

        let scripts = extract_scripts(content)
            .and_then(|scripts| scripts.check_declarations().map(|()| scripts))
            .map_err(|err| DocumentizeError::new_parse_error(err, content))?;
        let source = scripts.declaration_source();

        let unit_name = unique_unit_name(filename);
        let unit = self.session.create_unit(&unit_name, &source)?;

        let resolver = SymbolResolver::new(&self.session, unit);
        let metadata = extract_metadata(filename, &component, &resolver, self.logger());

        self.session.remove_unit(unit);
        metadata
    }

    /// Replaces `tag` in `content` with the documentation for `metadata`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentizeError::Markdown`] if the document cannot be
    /// rendered.
    pub fn patch_content(
        &self,
        content: &str,
        tag: &MetaTag,
        metadata: Metadata,
    ) -> Result<ProcessedMarkup, DocumentizeError> {
        let comment = component_comment(&render_markdown(&metadata)?);
        let code = tag.replace(content, &comment);

        if !code.contains(&comment) {
            self.logger()
                .warn(format!("Failed to patch {}", metadata.filename()));
            return Ok(ProcessedMarkup::Skipped);
        }

        debug!(filename = metadata.filename(); "Patched component");
        Ok(ProcessedMarkup::Patched { code, metadata })
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::{
        config::{DataAttributes, Symbols},
        error::ConfigError,
        logger::tests::RecordingReporter,
    };

    fn preprocessor(debug: bool) -> Preprocessor<Project, RecordingReporter> {
        Preprocessor::new(
            Config::default().with_debug(debug),
            Project::new(),
            RecordingReporter::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let attributes = DataAttributes::new(
            "data-documentize",
            "description",
            "data-symbol-events",
            "data-symbol-props",
            "data-symbol-slots",
        );
        let config = Config::new(false, attributes, Symbols::default());

        let err = Preprocessor::new(config, Project::new(), LogReporter)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DocumentizeError::Config(ConfigError::InvalidDataAttribute { field: "description", .. })
        ));
    }

    #[test]
    fn test_skips_without_marker() {
        let mut preprocessor = preprocessor(true);
        let result = preprocessor.markup("<div />", "Plain.svelte").unwrap();

        assert_eq!(result, ProcessedMarkup::Skipped);
        assert_eq!(
            preprocessor.reporter().messages(),
            vec![(
                Level::Warn,
                "Failed to find meta tag inside 'Plain.svelte'".to_string()
            )]
        );
    }

    #[test]
    fn test_unit_removed_after_pass() {
        let mut preprocessor = preprocessor(false);
        let content = "<script lang=\"ts\">interface $$Props { a: string }</script>\n<meta data-documentize>";

        let result = preprocessor.markup(content, "A.svelte").unwrap();
        assert!(result.is_patched());
        assert!(preprocessor.session().is_empty());

        let content = "<script>interface $$Props {}\ntype $$Props = {};</script><meta data-documentize>";
        assert!(preprocessor.markup(content, "B.svelte").is_err());
        assert!(preprocessor.session().is_empty());
    }

    #[test]
    fn test_comment_replaces_tag() {
        let mut preprocessor = preprocessor(false);
        let content = "<meta data-documentize data-description=\"Hi\" />\n<p>body</p>";

        let result = preprocessor.markup(content, "Hi.svelte").unwrap();
        let metadata = result.metadata().cloned().unwrap();
        let code = result.into_code().unwrap();

        assert!(code.starts_with("<!--\n@component\n\nHi\n\n### Events\n"));
        assert!(code.ends_with("This component does not have any slots.\n-->\n<p>body</p>"));
        assert_eq!(metadata.description(), "Hi");
    }

    #[test]
    fn test_multiple_markers_fail() {
        let mut preprocessor = preprocessor(false);
        let content = "<meta data-documentize><meta data-documentize>";

        let err = preprocessor.markup(content, "Twice.svelte").unwrap_err();
        assert!(matches!(err, DocumentizeError::Parse { .. }));
    }

    #[test]
    fn test_script_errors_carry_component_source() {
        let mut preprocessor = preprocessor(false);
        let content = "<script>\nlet a = \"oops\n</script>\n<meta data-documentize>";

        match preprocessor.markup(content, "Broken.svelte").unwrap_err() {
            DocumentizeError::Parse { err, src } => {
                let span = err.diagnostics()[0].primary_label().unwrap().span();
                assert_eq!(src, content);
                assert_eq!(&src[span.start()..span.start() + 1], "\"");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(preprocessor.session().is_empty());
    }

    #[test]
    fn test_regex_literal_in_script() {
        let mut preprocessor = preprocessor(false);
        let content = "<script lang=\"ts\">\n  const quote = /'/g;\n  interface $$Props { label: string }\n</script>\n<meta data-documentize>";

        let result = preprocessor.markup(content, "Quote.svelte").unwrap();
        let props = result.metadata().unwrap().props();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name(), "label");
    }

    #[test]
    fn test_component_comment_trims() {
        assert_eq!(
            component_comment("\n\nbody\n\n"),
            "<!--\n@component\n\nbody\n-->"
        );
    }
}
