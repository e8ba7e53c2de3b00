use std::fmt;
use std::marker::PhantomData;

use crate::value::{FieldValue, ValueKind};

/// A named record field whose values are of type `T`.
pub struct EntryKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntryKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The field name as it appears in expanded records.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: FieldValue> EntryKey<T> {
    pub fn kind(&self) -> ValueKind {
        T::KIND
    }
}

impl<T> Clone for EntryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntryKey<T> {}

impl<T> fmt::Debug for EntryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryKey({})", self.name)
    }
}

macro_rules! entry_keys {
    ($( $(#[$doc:meta])* $ident:ident: $ty:ty = $name:literal; )*) => {
        $(
            $(#[$doc])*
            pub const $ident: EntryKey<$ty> = EntryKey::new($name);
        )*

        /// Every known field name with its declared value kind.
        pub const VOCABULARY: &[(&str, ValueKind)] = &[
            $( ($name, <$ty as FieldValue>::KIND), )*
        ];
    };
}

/// The field vocabulary of the index format.
pub mod keys {
    use super::EntryKey;
    use crate::value::{FieldValue, ValueKind};

    entry_keys! {
        /// Repository id, carried by the descriptor.
        REPOSITORY_ID: String = "repositoryId";
        /// Every group id in the index.
        ALL_GROUPS: Vec<String> = "allGroups";
        /// Root group ids in the index.
        ROOT_GROUPS: Vec<String> = "rootGroups";
        /// When the record itself was last modified (epoch millis).
        REC_MODIFIED: i64 = "recordModified";

        GROUP_ID: String = "groupId";
        ARTIFACT_ID: String = "artifactId";
        VERSION: String = "version";
        CLASSIFIER: String = "classifier";
        PACKAGING: String = "packaging";
        FILE_EXTENSION: String = "fileExtension";
        /// Artifact file modification time (epoch millis).
        FILE_MODIFIED: i64 = "fileModified";
        FILE_SIZE: i64 = "fileSize";
        HAS_SOURCES: bool = "hasSources";
        HAS_JAVADOC: bool = "hasJavadoc";
        HAS_SIGNATURE: bool = "hasSignature";
        NAME: String = "name";
        DESCRIPTION: String = "description";
        SHA1: String = "sha1";
        SHA_256: String = "sha256";
        /// Fully qualified class names found in the artifact.
        CLASSNAMES: Vec<String> = "classNames";
        PLUGIN_PREFIX: String = "pluginPrefix";
        PLUGIN_GOALS: Vec<String> = "pluginGoals";

        OSGI_BUNDLE_SYMBOLIC_NAME: String = "Bundle-SymbolicName";
        OSGI_BUNDLE_VERSION: String = "Bundle-Version";
        OSGI_EXPORT_PACKAGE: String = "Export-Package";
        OSGI_EXPORT_SERVICE: String = "Export-Service";
        OSGI_BUNDLE_DESCRIPTION: String = "Bundle-Description";
        OSGI_BUNDLE_NAME: String = "Bundle-Name";
        OSGI_BUNDLE_LICENSE: String = "Bundle-License";
        OSGI_EXPORT_DOCURL: String = "Bundle-DocURL";
        OSGI_IMPORT_PACKAGE: String = "Import-Package";
        OSGI_REQUIRE_BUNDLE: String = "Require-Bundle";
        OSGI_PROVIDE_CAPABILITY: String = "Provide-Capability";
        OSGI_REQUIRE_CAPABILITY: String = "Require-Capability";
        OSGI_FRAGMENT_HOST: String = "Fragment-Host";
        /// Bundle-RequiredExecutionEnvironment.
        OSGI_BREE: String = "Bundle-RequiredExecutionEnvironment";
    }

    /// The declared value kind of a known field, or `None` for unknown names.
    pub fn kind_of(name: &str) -> Option<ValueKind> {
        VOCABULARY
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
    }
}
