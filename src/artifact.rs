//! Remote artifact naming
//!
//! The Spark runtime jar the test harness needs is identified either by its
//! full download URL or by a Maven coordinate rendered against a repository
//! base. Both forms resolve to a URL and a local file name.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// Repository base that coordinate paths are appended to.
pub const DEFAULT_REPOSITORY: &str = "https://search.maven.org/remotecontent?filepath=";

/// Coordinate of the Iceberg Spark runtime used by the integration tests.
pub const DEFAULT_COORDINATE: &str = "org.apache.iceberg:iceberg-spark-runtime-3.3_2.12:0.14.1";

/// Download URL of the Iceberg Spark runtime jar.
pub const JAR_URL: &str = "https://search.maven.org/remotecontent?filepath=org/apache/iceberg/iceberg-spark-runtime-3.3_2.12/0.14.1/iceberg-spark-runtime-3.3_2.12-0.14.1.jar";

/// Derive the local file name from a download URL.
///
/// The name is whatever follows the last `/` of the URL text, so query-style
/// repository URLs (`...?filepath=org/.../name.jar`) resolve to the artifact
/// name rather than the endpoint name.
pub fn jar_file_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidUrl(format!(
                "{url}: unsupported scheme '{other}'"
            )))
        }
    }

    let last = url.rsplit('/').next().unwrap_or_default();
    let name = last.split(['?', '#']).next().unwrap_or_default();
    if name.is_empty() {
        return Err(Error::InvalidUrl(format!("{url}: no file name in URL")));
    }
    if name == "." || name == ".." || name.contains('\\') {
        return Err(Error::InvalidUrl(format!(
            "{url}: '{name}' is not a usable file name"
        )));
    }

    Ok(name.to_string())
}

/// `group:artifact:version[:classifier][@extension]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
    pub extension: String,
}

impl MavenCoordinate {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidCoordinate(format!("'{spec}': {reason}"));

        let (gav, extension) = match spec.split_once('@') {
            Some((gav, ext)) if !ext.is_empty() => (gav, ext.to_string()),
            Some(_) => return Err(invalid("empty extension")),
            None => (spec, "jar".to_string()),
        };

        let mut parts = gav.split(':');
        let mut next_required = |what: &str| {
            parts
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| invalid(&format!("missing {what}")))
        };
        let group = next_required("group")?;
        let artifact = next_required("artifact")?;
        let version = next_required("version")?;
        let classifier = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
        if parts.next().is_some() {
            return Err(invalid("too many segments"));
        }

        Ok(Self {
            group,
            artifact,
            version,
            classifier,
            extension,
        })
    }

    pub fn file_name(&self) -> String {
        let classifier = self
            .classifier
            .as_deref()
            .map(|c| format!("-{c}"))
            .unwrap_or_default();
        format!(
            "{}-{}{}.{}",
            self.artifact, self.version, classifier, self.extension
        )
    }

    /// Path of the artifact relative to a repository root.
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.file_name()
        )
    }

    /// Repository bases either end in `/` or in a query parameter such as
    /// `?filepath=`; anything else gets a `/` separator.
    pub fn download_url(&self, repository: &str) -> String {
        let path = self.repository_path();
        if repository.ends_with('/') || repository.ends_with('=') {
            format!("{repository}{path}")
        } else {
            format!("{repository}/{path}")
        }
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        if self.extension != "jar" {
            write!(f, "@{}", self.extension)?;
        }
        Ok(())
    }
}
