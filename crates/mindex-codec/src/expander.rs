use mindex_record::{keys, EntryKey, Record, RecordType};
use tracing::{debug, trace};

use crate::error::{CodecError, CodecResult};
use crate::fields::{self, split_fields};
use crate::EncodedRecord;

/// Expands chunk-native string maps back into [`Record`]s.
///
/// Inverse of [`compact`](crate::compact): for every field set on a record,
/// `expand(compact(r))` yields the same value. Empty composite segments read
/// back as unset fields, and the three INFO flags always read back as set.
pub struct RecordExpander;

impl RecordExpander {
    /// Infer the record type from its marker key.
    ///
    /// Markers are checked in the order `DESCRIPTOR`, `allGroups`,
    /// `rootGroups`, `del`, `u`.
    pub fn record_type(encoded: &EncodedRecord) -> CodecResult<RecordType> {
        let markers = [
            (fields::DESCRIPTOR, RecordType::Descriptor),
            (fields::ALL_GROUPS, RecordType::AllGroups),
            (fields::ROOT_GROUPS, RecordType::RootGroups),
            (fields::DELETED, RecordType::ArtifactRemove),
            (fields::UINFO, RecordType::ArtifactAdd),
        ];
        markers
            .into_iter()
            .find(|(marker, _)| encoded.contains_key(*marker))
            .map(|(_, record_type)| record_type)
            .ok_or_else(|| {
                debug!(keys = encoded.len(), "no record marker found");
                CodecError::UnrecognizedRecord(encoded.clone())
            })
    }

    /// Expand one encoded record.
    pub fn expand(encoded: &EncodedRecord) -> CodecResult<Record> {
        let record_type = Self::record_type(encoded)?;
        trace!(%record_type, keys = encoded.len(), "expanding record");
        let mut record = Record::new(record_type);
        match record_type {
            RecordType::Descriptor => expand_descriptor(encoded, &mut record)?,
            RecordType::AllGroups => {
                expand_list(encoded, fields::ALL_GROUPS_LIST, &keys::ALL_GROUPS, &mut record)
            }
            RecordType::RootGroups => {
                expand_list(encoded, fields::ROOT_GROUPS_LIST, &keys::ROOT_GROUPS, &mut record)
            }
            RecordType::ArtifactRemove => {
                expand_modified(encoded, &mut record)?;
                if let Some(uinfo) = encoded.get(fields::DELETED) {
                    expand_uinfo(fields::DELETED, uinfo, &mut record)?;
                }
            }
            RecordType::ArtifactAdd => expand_added_artifact(encoded, &mut record)?,
        }
        Ok(record)
    }
}

fn expand_descriptor(encoded: &EncodedRecord, record: &mut Record) -> CodecResult<()> {
    let Some(info) = encoded.get(fields::IDXINFO) else {
        return Ok(());
    };
    let segments = split_fields(info);
    let [version, repository_id] = segments[..] else {
        return Err(CodecError::MalformedField {
            field: fields::IDXINFO,
            expected: "2",
            actual: segments.len(),
        });
    };
    if version != fields::INDEX_VERSION {
        return Err(CodecError::UnsupportedVersion(version.to_string()));
    }
    put_non_empty(record, &keys::REPOSITORY_ID, repository_id);
    Ok(())
}

fn expand_added_artifact(encoded: &EncodedRecord, record: &mut Record) -> CodecResult<()> {
    if let Some(uinfo) = encoded.get(fields::UINFO) {
        expand_uinfo(fields::UINFO, uinfo, record)?;
    }
    if let Some(info) = encoded.get(fields::INFO) {
        expand_info(info, record)?;
    }
    expand_modified(encoded, record)?;

    for (name, key) in fields::STRING_FIELDS {
        if let Some(value) = encoded.get(*name) {
            record.put(key, value.clone());
        }
    }
    for (name, key) in fields::LIST_FIELDS {
        expand_list(encoded, name, key, record);
    }
    Ok(())
}

fn expand_modified(encoded: &EncodedRecord, record: &mut Record) -> CodecResult<()> {
    if let Some(modified) = encoded.get(fields::MODIFIED) {
        record.put(&keys::REC_MODIFIED, parse_long(fields::MODIFIED, modified)?);
    }
    Ok(())
}

fn expand_list(
    encoded: &EncodedRecord,
    name: &str,
    key: &EntryKey<Vec<String>>,
    record: &mut Record,
) {
    if let Some(joined) = encoded.get(name) {
        let items = split_fields(joined).into_iter().map(str::to_string).collect();
        record.put(key, items);
    }
}

/// Four segments without a classifier, five with one.
fn expand_uinfo(field: &'static str, uinfo: &str, record: &mut Record) -> CodecResult<()> {
    let segments = split_fields(uinfo);
    match segments[..] {
        [group_id, artifact_id, version, classifier] => {
            put_identity(record, group_id, artifact_id, version);
            put_non_empty(record, &keys::CLASSIFIER, classifier);
        }
        [group_id, artifact_id, version, classifier, extension] => {
            put_identity(record, group_id, artifact_id, version);
            record.put(&keys::CLASSIFIER, classifier.to_string());
            put_non_empty(record, &keys::FILE_EXTENSION, extension);
        }
        _ => {
            return Err(CodecError::MalformedField {
                field,
                expected: "4 or 5",
                actual: segments.len(),
            })
        }
    }
    Ok(())
}

fn expand_info(info: &str, record: &mut Record) -> CodecResult<()> {
    let segments = split_fields(info);
    let [packaging, modified, size, sources, javadoc, signature, extension] = segments[..] else {
        return Err(CodecError::MalformedField {
            field: fields::INFO,
            expected: "7",
            actual: segments.len(),
        });
    };

    put_non_empty(record, &keys::PACKAGING, packaging);
    if !modified.is_empty() {
        record.put(&keys::FILE_MODIFIED, parse_long(fields::INFO, modified)?);
    }
    if !size.is_empty() {
        record.put(&keys::FILE_SIZE, parse_long(fields::INFO, size)?);
    }
    record.put(&keys::HAS_SOURCES, sources == "1");
    record.put(&keys::HAS_JAVADOC, javadoc == "1");
    record.put(&keys::HAS_SIGNATURE, signature == "1");
    put_non_empty(record, &keys::FILE_EXTENSION, extension);
    Ok(())
}

fn put_identity(record: &mut Record, group_id: &str, artifact_id: &str, version: &str) {
    put_non_empty(record, &keys::GROUP_ID, group_id);
    put_non_empty(record, &keys::ARTIFACT_ID, artifact_id);
    put_non_empty(record, &keys::VERSION, version);
}

fn put_non_empty(record: &mut Record, key: &EntryKey<String>, value: &str) {
    if !value.is_empty() {
        record.put(key, value.to_string());
    }
}

fn parse_long(field: &'static str, value: &str) -> CodecResult<i64> {
    value.parse().map_err(|_| CodecError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact;
    use mindex_record::keys::*;

    fn encoded(pairs: &[(&str, &str)]) -> EncodedRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn infers_each_type() {
        let cases = [
            (encoded(&[("DESCRIPTOR", "NexusIndex")]), RecordType::Descriptor),
            (encoded(&[("allGroups", "allGroups")]), RecordType::AllGroups),
            (encoded(&[("rootGroups", "allGroups")]), RecordType::RootGroups),
            (encoded(&[("del", "g|a|1|")]), RecordType::ArtifactRemove),
            (encoded(&[("u", "g|a|1|"), ("i", "jar|||0|0|0|")]), RecordType::ArtifactAdd),
        ];
        for (map, expected) in cases {
            assert_eq!(RecordExpander::record_type(&map).unwrap(), expected);
        }
    }

    #[test]
    fn unrecognized_record_carries_input() {
        let map = encoded(&[("x", "y")]);
        let err = RecordExpander::expand(&map).unwrap_err();
        assert_eq!(err, CodecError::UnrecognizedRecord(map));
    }

    #[test]
    fn descriptor() {
        let record = RecordExpander::expand(&encoded(&[
            ("DESCRIPTOR", "NexusIndex"),
            ("IDXINFO", "1.0|central"),
        ]))
        .unwrap();
        assert_eq!(record.record_type(), RecordType::Descriptor);
        assert_eq!(record.get(&REPOSITORY_ID).map(String::as_str), Some("central"));
    }

    #[test]
    fn descriptor_rejects_other_versions() {
        let err = RecordExpander::expand(&encoded(&[
            ("DESCRIPTOR", "NexusIndex"),
            ("IDXINFO", "2.0|central"),
        ]))
        .unwrap_err();
        assert_eq!(err, CodecError::UnsupportedVersion("2.0".into()));
    }

    #[test]
    fn descriptor_rejects_extra_segments() {
        let err = RecordExpander::expand(&encoded(&[
            ("DESCRIPTOR", "NexusIndex"),
            ("IDXINFO", "1.0|a|b"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CodecError::MalformedField { field: "IDXINFO", actual: 3, .. }));
    }

    #[test]
    fn groups_lists() {
        let record = RecordExpander::expand(&encoded(&[
            ("allGroups", "allGroups"),
            ("allGroupsList", "org.foo|org.bar"),
        ]))
        .unwrap();
        assert_eq!(
            record.get(&ALL_GROUPS),
            Some(&vec!["org.foo".to_string(), "org.bar".to_string()])
        );

        let record = RecordExpander::expand(&encoded(&[("rootGroups", "allGroups")])).unwrap();
        assert_eq!(record.record_type(), RecordType::RootGroups);
        assert!(record.is_empty());
    }

    #[test]
    fn artifact_remove() {
        let record =
            RecordExpander::expand(&encoded(&[("m", "1000"), ("del", "g|a|1.0|")])).unwrap();
        assert_eq!(record.record_type(), RecordType::ArtifactRemove);
        assert_eq!(record.get(&REC_MODIFIED), Some(&1000));
        assert_eq!(record.get(&GROUP_ID).map(String::as_str), Some("g"));
        assert_eq!(record.get(&VERSION).map(String::as_str), Some("1.0"));
        assert!(!record.contains(&CLASSIFIER));
    }

    #[test]
    fn artifact_add_with_classifier() {
        let record = RecordExpander::expand(&encoded(&[
            ("u", "g|a|1.0|sources|jar"),
            ("i", "jar|2000|500|1|0|0|jar"),
        ]))
        .unwrap();
        assert_eq!(record.get(&CLASSIFIER).map(String::as_str), Some("sources"));
        assert_eq!(record.get(&FILE_EXTENSION).map(String::as_str), Some("jar"));
        assert_eq!(record.get(&PACKAGING).map(String::as_str), Some("jar"));
        assert_eq!(record.get(&FILE_MODIFIED), Some(&2000));
        assert_eq!(record.get(&FILE_SIZE), Some(&500));
        assert_eq!(record.get(&HAS_SOURCES), Some(&true));
        assert_eq!(record.get(&HAS_JAVADOC), Some(&false));
        assert_eq!(record.get(&HAS_SIGNATURE), Some(&false));
    }

    #[test]
    fn artifact_add_optional_fields() {
        let record = RecordExpander::expand(&encoded(&[
            ("u", "g|a|1.0|"),
            ("n", "Demo"),
            ("1", "abc"),
            ("gx", "run|stop"),
            ("Fragment-Host", "host"),
        ]))
        .unwrap();
        assert_eq!(record.get(&NAME).map(String::as_str), Some("Demo"));
        assert_eq!(record.get(&SHA1).map(String::as_str), Some("abc"));
        assert_eq!(
            record.get(&PLUGIN_GOALS),
            Some(&vec!["run".to_string(), "stop".to_string()])
        );
        assert_eq!(record.get(&OSGI_FRAGMENT_HOST).map(String::as_str), Some("host"));
        assert!(!record.contains(&HAS_SOURCES));
    }

    #[test]
    fn malformed_uinfo() {
        let err = RecordExpander::expand(&encoded(&[("del", "g|a")])).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedField { field: "del", expected: "4 or 5", actual: 2 }
        );
    }

    #[test]
    fn malformed_info() {
        let err = RecordExpander::expand(&encoded(&[("u", "g|a|1|"), ("i", "jar|1|2")]))
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedField { field: "i", actual: 3, .. }));
    }

    #[test]
    fn invalid_numbers() {
        let err = RecordExpander::expand(&encoded(&[("m", "soon"), ("del", "g|a|1|")]))
            .unwrap_err();
        assert_eq!(err, CodecError::InvalidNumber { field: "m", value: "soon".into() });

        let err = RecordExpander::expand(&encoded(&[("u", "g|a|1|"), ("i", "jar|x|1|0|0|0|")]))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidNumber { field: "i", .. }));
    }

    #[test]
    fn empty_classifier_survives_roundtrip() {
        let record = Record::new(RecordType::ArtifactAdd)
            .with(&GROUP_ID, "g")
            .with(&ARTIFACT_ID, "a")
            .with(&VERSION, "1")
            .with(&CLASSIFIER, "");
        let expanded = RecordExpander::expand(&compact(&record)).unwrap();
        assert_eq!(expanded.get(&CLASSIFIER).map(String::as_str), Some(""));
    }
}
