//! Selection of the fields that take part in codec operations.

use crate::field::CodecField;

/// Chooses which of a codec's declared fields are encoded and decoded, and
/// in what order.
pub trait ClassMapper {
    fn select<'a>(&self, fields: Vec<CodecField<'a>>) -> Vec<CodecField<'a>>;
}

/// Keeps every non-transient field with a non-blank key, in declaration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonClassMapper;

impl ClassMapper for CommonClassMapper {
    fn select<'a>(&self, fields: Vec<CodecField<'a>>) -> Vec<CodecField<'a>> {
        fields
            .into_iter()
            .filter(|field| !field.transient && !field.key.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_transient_and_unkeyed_fields() {
        let (mut a, mut b, mut c) = (1i32, 2i32, 3i32);
        let fields = vec![
            CodecField::value("a", "a", &mut a),
            CodecField::value("b", "b", &mut b).transient(),
            CodecField::value("c", " ", &mut c),
        ];
        let names: Vec<_> = CommonClassMapper
            .select(fields)
            .iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, vec!["a"]);
    }
}
