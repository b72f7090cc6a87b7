///
/// Schema
///
/// Maps logical (application-facing) attribute names onto the directory's
/// native names for one object type.
///
/// `translate_attribute_name` is total: a name with no mapping must come back
/// unchanged. Queries rely on that when they translate a selection list.
///

pub trait Schema: Send + Sync {
    fn object_type(&self) -> &str;

    fn translate_attribute_name(&self, name: &str) -> String;
}
