use super::{AttributeSource, NameIter};
use crate::model::{AttrInfo, RawAttribute, TypeTag};
use std::collections::HashSet;
use std::io;

/// In-memory attribute source.
///
/// Unlike a real attribute store, the same name may be added more than once,
/// which lets callers model multi-valued input. Failures can be injected per
/// name or at a given enumeration position to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    type_id: Option<String>,
    attrs: Vec<RawAttribute>,
    failing_info: HashSet<String>,
    failing_reads: HashSet<String>,
    fail_enumeration_at: Option<usize>,
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Add a value instance. Adding an existing name adds a second instance.
    pub fn add(&mut self, name: impl Into<String>, tag: TypeTag, bytes: Vec<u8>) {
        self.attrs.push(RawAttribute::new(name, tag, bytes));
    }

    pub fn with(mut self, name: impl Into<String>, tag: TypeTag, bytes: Vec<u8>) -> Self {
        self.add(name, tag, bytes);
        self
    }

    pub fn with_string(self, name: impl Into<String>, value: &str) -> Self {
        self.with(name, TypeTag::String, value.as_bytes().to_vec())
    }

    pub fn with_int32(self, name: impl Into<String>, value: i32) -> Self {
        self.with(name, TypeTag::Int32, value.to_le_bytes().to_vec())
    }

    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with(name, TypeTag::Boolean, vec![value as u8])
    }

    /// Make `attr_info` fail for this name.
    pub fn fail_info(&mut self, name: impl Into<String>) {
        self.failing_info.insert(name.into());
    }

    /// Make `read_attr` fail for this name.
    pub fn fail_read(&mut self, name: impl Into<String>) {
        self.failing_reads.insert(name.into());
    }

    /// Make enumeration fail after `position` names were yielded.
    pub fn fail_enumeration_at(&mut self, position: usize) {
        self.fail_enumeration_at = Some(position);
    }

    fn distinct_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.attrs
            .iter()
            .filter(|attr| seen.insert(attr.name.as_str()))
            .map(|attr| attr.name.clone())
            .collect()
    }

    fn instances<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawAttribute> + 'a {
        self.attrs.iter().filter(move |attr| attr.name == name)
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no attribute named '{}'", name),
    )
}

impl AttributeSource for MemSource {
    fn attr_names(&self) -> io::Result<NameIter<'_>> {
        let names = self.distinct_names();
        let fail_at = self.fail_enumeration_at;
        let iter = names
            .into_iter()
            .map(Ok)
            .enumerate()
            .map(move |(i, item)| match fail_at {
                Some(at) if i >= at => Err(io::Error::other("simulated enumeration failure")),
                _ => item,
            });
        Ok(Box::new(iter))
    }

    fn attr_info(&self, name: &str) -> io::Result<AttrInfo> {
        if self.failing_info.contains(name) {
            return Err(io::Error::other("simulated info failure"));
        }
        let mut instances = self.instances(name);
        let first = instances.next().ok_or_else(|| not_found(name))?;
        Ok(AttrInfo {
            tag: first.tag,
            size: first.bytes.len(),
            count: 1 + instances.count(),
        })
    }

    fn read_attr(&self, name: &str, _info: &AttrInfo) -> io::Result<Vec<u8>> {
        if self.failing_reads.contains(name) {
            return Err(io::Error::other("simulated read failure"));
        }
        self.instances(name)
            .next()
            .map(|attr| attr.bytes.clone())
            .ok_or_else(|| not_found(name))
    }

    fn type_identifier(&self) -> io::Result<Option<String>> {
        Ok(self.type_id.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &MemSource) -> Vec<io::Result<String>> {
        source.attr_names().unwrap().collect()
    }

    #[test]
    fn names_are_distinct_in_first_seen_order() {
        let source = MemSource::new()
            .with_string("Tags", "a")
            .with_int32("Rating", 3)
            .with_string("Tags", "b");

        let names: Vec<String> = names(&source).into_iter().map(|n| n.unwrap()).collect();
        assert_eq!(names, vec!["Tags", "Rating"]);
    }

    #[test]
    fn info_counts_instances() {
        let source = MemSource::new()
            .with_string("Tags", "a")
            .with_string("Tags", "bc");

        let info = source.attr_info("Tags").unwrap();
        assert_eq!(info.count, 2);
        assert_eq!(info.tag, TypeTag::String);
        assert_eq!(info.size, 1);
    }

    #[test]
    fn missing_name_is_not_found() {
        let source = MemSource::new();
        let err = source.attr_info("nope").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn injected_failures() {
        let mut source = MemSource::new()
            .with_string("A", "x")
            .with_string("B", "y");
        source.fail_read("A");
        source.fail_info("B");
        source.fail_enumeration_at(1);

        let info = source.attr_info("A").unwrap();
        assert!(source.read_attr("A", &info).is_err());
        assert!(source.attr_info("B").is_err());

        let names = names(&source);
        assert!(names[0].is_ok());
        assert!(names[1].is_err());
    }
}
