//! Wire names and value encodings of the index chunk format.
//!
//! Key names, marker literals and the separator are fixed by existing chunk
//! consumers and must not change.

use mindex_record::{keys, EntryKey};

use crate::EncodedRecord;

/// Separates segments of composite fields and elements of joined lists.
pub const FIELD_SEPARATOR: char = '|';

/// Descriptor marker key and its value.
pub const DESCRIPTOR: &str = "DESCRIPTOR";
pub const DESCRIPTOR_MARKER: &str = "NexusIndex";
/// Descriptor info: `version|repositoryId`.
pub const IDXINFO: &str = "IDXINFO";
pub const INDEX_VERSION: &str = "1.0";

pub const ALL_GROUPS: &str = "allGroups";
pub const ALL_GROUPS_LIST: &str = "allGroupsList";
pub const ROOT_GROUPS: &str = "rootGroups";
pub const ROOT_GROUPS_LIST: &str = "rootGroupsList";
/// Value of both group-listing markers. Root groups reuse the all-groups
/// literal; existing readers expect exactly this.
pub const GROUPS_MARKER: &str = "allGroups";

/// Deletion marker carrying the UINFO of the removed artifact.
pub const DELETED: &str = "del";
/// `groupId|artifactId|version|classifier[|extension]`.
pub const UINFO: &str = "u";
/// `packaging|fileModified|fileSize|sources|javadoc|signature|extension`.
pub const INFO: &str = "i";
pub const MODIFIED: &str = "m";
pub const NAME: &str = "n";
pub const DESCRIPTION: &str = "d";
pub const SHA1: &str = "1";
pub const CLASSNAMES: &str = "classnames";
pub const PLUGIN_PREFIX: &str = "px";
pub const PLUGIN_GOALS: &str = "gx";
pub const SHA_256: &str = "sha256";

/// Optional string fields of an artifact-add record, copied verbatim.
pub const STRING_FIELDS: &[(&str, EntryKey<String>)] = &[
    (NAME, keys::NAME),
    (DESCRIPTION, keys::DESCRIPTION),
    (SHA1, keys::SHA1),
    (PLUGIN_PREFIX, keys::PLUGIN_PREFIX),
    ("Bundle-SymbolicName", keys::OSGI_BUNDLE_SYMBOLIC_NAME),
    ("Bundle-Version", keys::OSGI_BUNDLE_VERSION),
    ("Export-Package", keys::OSGI_EXPORT_PACKAGE),
    ("Export-Service", keys::OSGI_EXPORT_SERVICE),
    ("Bundle-Description", keys::OSGI_BUNDLE_DESCRIPTION),
    ("Bundle-Name", keys::OSGI_BUNDLE_NAME),
    ("Bundle-License", keys::OSGI_BUNDLE_LICENSE),
    ("Bundle-DocURL", keys::OSGI_EXPORT_DOCURL),
    ("Import-Package", keys::OSGI_IMPORT_PACKAGE),
    ("Require-Bundle", keys::OSGI_REQUIRE_BUNDLE),
    ("Provide-Capability", keys::OSGI_PROVIDE_CAPABILITY),
    ("Require-Capability", keys::OSGI_REQUIRE_CAPABILITY),
    ("Fragment-Host", keys::OSGI_FRAGMENT_HOST),
    ("Bundle-RequiredExecutionEnvironment", keys::OSGI_BREE),
    (SHA_256, keys::SHA_256),
];

/// Optional list fields of an artifact-add record, stored joined.
pub const LIST_FIELDS: &[(&str, EntryKey<Vec<String>>)] = &[
    (CLASSNAMES, keys::CLASSNAMES),
    (PLUGIN_GOALS, keys::PLUGIN_GOALS),
];

/// The empty string for an unset value.
pub fn nvl(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Join segments with [`FIELD_SEPARATOR`], without a trailing separator.
pub fn join_fields<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(FIELD_SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}

/// Split on [`FIELD_SEPARATOR`], keeping empty segments.
pub fn split_fields(value: &str) -> Vec<&str> {
    value.split(FIELD_SEPARATOR).collect()
}

/// Join a list for storage; `None` when the list is empty.
pub(crate) fn join_list(items: &[String]) -> Option<String> {
    (!items.is_empty()).then(|| join_fields(items))
}

pub(crate) fn flag(value: Option<&bool>) -> &'static str {
    if value.copied().unwrap_or(false) {
        "1"
    } else {
        "0"
    }
}

/// Insert `name` only when `value` is set and `encode` produces something.
pub(crate) fn put_if_present<T: ?Sized>(
    target: &mut EncodedRecord,
    name: &str,
    value: Option<&T>,
    encode: impl FnOnce(&T) -> Option<String>,
) {
    if let Some(encoded) = value.and_then(encode) {
        target.insert(name.to_string(), encoded);
    }
}
