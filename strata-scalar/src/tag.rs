use std::fmt::{Display, Formatter};

/// The type discriminant of a tagged value.
///
/// `Block` and `Cell` exist for classification only. They never appear on a [`crate::Value`] or
/// [`crate::ValueRef`]; operators receive nested blocks and cell blocks as separate operands, which
/// report these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Missing,
    Boolean,
    Int32,
    Int64,
    Double,
    Decimal,
    ShortString,
    LongString,
    Block,
    Cell,
}

/// Coarse grouping of tags used by the canonical sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeClass {
    Missing,
    Number,
    String,
    Boolean,
    /// Block and cell operands. No scalar value belongs to this class.
    Block,
}

impl TypeTag {
    /// Whether an owned value with this tag keeps its payload on the heap.
    pub fn is_heap_backed(self) -> bool {
        matches!(
            self,
            TypeTag::Decimal | TypeTag::LongString | TypeTag::Block | TypeTag::Cell
        )
    }

    pub fn class(self) -> TypeClass {
        match self {
            TypeTag::Missing => TypeClass::Missing,
            TypeTag::Int32 | TypeTag::Int64 | TypeTag::Double | TypeTag::Decimal => {
                TypeClass::Number
            }
            TypeTag::ShortString | TypeTag::LongString => TypeClass::String,
            TypeTag::Boolean => TypeClass::Boolean,
            TypeTag::Block | TypeTag::Cell => TypeClass::Block,
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Missing => "missing",
            TypeTag::Boolean => "bool",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Double => "double",
            TypeTag::Decimal => "decimal",
            TypeTag::ShortString => "short_string",
            TypeTag::LongString => "long_string",
            TypeTag::Block => "block",
            TypeTag::Cell => "cell",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_backed_tags() {
        assert!(TypeTag::Decimal.is_heap_backed());
        assert!(TypeTag::LongString.is_heap_backed());
        assert!(!TypeTag::ShortString.is_heap_backed());
        assert!(!TypeTag::Double.is_heap_backed());
        assert!(!TypeTag::Missing.is_heap_backed());
    }

    #[test]
    fn class_order() {
        assert!(TypeTag::Missing.class() < TypeTag::Int32.class());
        assert!(TypeTag::Decimal.class() < TypeTag::ShortString.class());
        assert!(TypeTag::LongString.class() < TypeTag::Boolean.class());
        assert_eq!(TypeTag::Int64.class(), TypeTag::Double.class());
    }

    #[test]
    fn block_operands_classify_together() {
        assert_eq!(TypeTag::Block.class(), TypeClass::Block);
        assert_eq!(TypeTag::Cell.class(), TypeClass::Block);
        assert!(TypeTag::Cell.is_heap_backed());
        assert_eq!(TypeTag::Cell.to_string(), "cell");
    }
}
