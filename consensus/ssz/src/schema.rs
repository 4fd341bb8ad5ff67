//! A static description of SSZ types.
//!
//! `SszType` classifies a type into one of the SSZ kinds and answers the layout questions the
//! encoder and merkleizer need (basic vs composite, fixed vs variable size). The set of kinds is
//! closed, so all classification is done by exhaustive matching.
use crate::BYTES_PER_LENGTH_OFFSET;
use ethereum_types::{H160, H256, U256};
use std::sync::Arc;

/// The kind of an SSZ type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SszKind {
    Uint,
    Bool,
    Vector,
    List,
    Container,
}

impl SszKind {
    /// Returns `true` for the scalar kinds.
    pub fn is_basic(self) -> bool {
        matches!(self, SszKind::Uint | SszKind::Bool)
    }
}

/// Describes the structure of an SSZ type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SszType {
    /// Unsigned integer of `bytes` width.
    Uint { bytes: usize },
    Bool,
    Vector { elem: Box<SszType>, length: usize },
    List { elem: Box<SszType>, limit: usize },
    Bitvector { bits: usize },
    Bitlist { limit: usize },
    Container {
        name: &'static str,
        fields: Vec<(&'static str, SszType)>,
    },
}

impl SszType {
    pub fn vector(elem: SszType, length: usize) -> Self {
        SszType::Vector {
            elem: Box::new(elem),
            length,
        }
    }

    pub fn list(elem: SszType, limit: usize) -> Self {
        SszType::List {
            elem: Box::new(elem),
            limit,
        }
    }

    /// `Vector[uint8, length]`.
    pub fn bytes(length: usize) -> Self {
        Self::vector(SszType::Uint { bytes: 1 }, length)
    }

    pub fn kind(&self) -> SszKind {
        match self {
            SszType::Uint { .. } => SszKind::Uint,
            SszType::Bool => SszKind::Bool,
            SszType::Vector { .. } | SszType::Bitvector { .. } => SszKind::Vector,
            SszType::List { .. } | SszType::Bitlist { .. } => SszKind::List,
            SszType::Container { .. } => SszKind::Container,
        }
    }

    pub fn is_basic(&self) -> bool {
        self.kind().is_basic()
    }

    /// Returns `true` if the encoded length of a value of this type depends on the value.
    pub fn is_variable_size(&self) -> bool {
        match self {
            SszType::Uint { .. } | SszType::Bool | SszType::Bitvector { .. } => false,
            SszType::List { .. } | SszType::Bitlist { .. } => true,
            SszType::Vector { elem, .. } => elem.is_variable_size(),
            SszType::Container { fields, .. } => {
                fields.iter().any(|(_, field)| field.is_variable_size())
            }
        }
    }

    /// The encoded length of every value of this type, or `None` if it is variable-size.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            SszType::Uint { bytes } => Some(*bytes),
            SszType::Bool => Some(1),
            SszType::Bitvector { bits } => Some((bits + 7) / 8),
            SszType::List { .. } | SszType::Bitlist { .. } => None,
            SszType::Vector { elem, length } => elem.fixed_len()?.checked_mul(*length),
            SszType::Container { fields, .. } => {
                fields.iter().map(|(_, field)| field.fixed_len()).sum()
            }
        }
    }

    /// The number of bytes this type occupies in the fixed part of an enclosing object.
    pub fn fixed_part_len(&self) -> usize {
        self.fixed_len().unwrap_or(BYTES_PER_LENGTH_OFFSET)
    }
}

/// Types which can describe their own SSZ structure.
pub trait SszSchema {
    fn ssz_schema() -> SszType;
}

macro_rules! impl_schema_for_uint {
    ($type: ty, $bytes: expr) => {
        impl SszSchema for $type {
            fn ssz_schema() -> SszType {
                SszType::Uint { bytes: $bytes }
            }
        }
    };
}

impl_schema_for_uint!(u8, 1);
impl_schema_for_uint!(u16, 2);
impl_schema_for_uint!(u32, 4);
impl_schema_for_uint!(u64, 8);
impl_schema_for_uint!(usize, 8);
impl_schema_for_uint!(U256, 32);

impl SszSchema for bool {
    fn ssz_schema() -> SszType {
        SszType::Bool
    }
}

impl SszSchema for H160 {
    fn ssz_schema() -> SszType {
        SszType::bytes(20)
    }
}

impl SszSchema for H256 {
    fn ssz_schema() -> SszType {
        SszType::bytes(32)
    }
}

impl<const N: usize> SszSchema for [u8; N] {
    fn ssz_schema() -> SszType {
        SszType::bytes(N)
    }
}

/// `Vec<T>` carries no bound of its own.
impl<T: SszSchema> SszSchema for Vec<T> {
    fn ssz_schema() -> SszType {
        SszType::list(T::ssz_schema(), usize::MAX)
    }
}

impl<T: SszSchema> SszSchema for Arc<T> {
    fn ssz_schema() -> SszType {
        T::ssz_schema()
    }
}
