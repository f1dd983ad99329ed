use crate::debugger::address::RelocatedAddress;
use crate::error::Error;
use bitflags::bitflags;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of runtime value, as reported by the tracing engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Array,
    Chan,
    Func,
    Interface,
    Map,
    Ptr,
    Slice,
    String,
    Struct,
    UnsafePointer,
}

/// Bit width of a float number or of a complex number component.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FloatWidth {
    W32,
    W64,
}

impl FloatWidth {
    /// Kind of a single float of this width.
    pub fn float_kind(self) -> Kind {
        match self {
            FloatWidth::W32 => Kind::Float32,
            FloatWidth::W64 => Kind::Float64,
        }
    }
}

/// How a value of some kind is rendered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ValueClass {
    Float(FloatWidth),
    Complex(FloatWidth),
    /// Strings and callables, value is a string constant.
    Text,
    Structured,
}

impl Kind {
    pub fn class(self) -> ValueClass {
        match self {
            Kind::Float32 => ValueClass::Float(FloatWidth::W32),
            Kind::Float64 => ValueClass::Float(FloatWidth::W64),
            Kind::Complex64 => ValueClass::Complex(FloatWidth::W32),
            Kind::Complex128 => ValueClass::Complex(FloatWidth::W64),
            Kind::String | Kind::Func => ValueClass::Text,
            Kind::Invalid
            | Kind::Bool
            | Kind::Int
            | Kind::Int8
            | Kind::Int16
            | Kind::Int32
            | Kind::Int64
            | Kind::Uint
            | Kind::Uint8
            | Kind::Uint16
            | Kind::Uint32
            | Kind::Uint64
            | Kind::Uintptr
            | Kind::Array
            | Kind::Chan
            | Kind::Interface
            | Kind::Map
            | Kind::Ptr
            | Kind::Slice
            | Kind::Struct
            | Kind::UnsafePointer => ValueClass::Structured,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Int
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Uintptr
        )
    }
}

/// Special float values. Stored out of band cause [`ConstValue`] holds only finite numbers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FloatSpecial {
    #[default]
    None,
    PosInf,
    NegInf,
    NaN,
}

/// Exact constant value of a variable.
#[derive(Clone, PartialEq, Debug)]
pub enum ConstValue {
    Bool(bool),
    Int(i128),
    Uint(u128),
    /// Exact binary64 value (a finite rational number).
    Float(f64),
    Str(String),
    Complex(f64, f64),
}

impl ConstValue {
    /// Return value as a float, integers are converted with possible rounding.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConstValue::Int(i) => Some(*i as f64),
            ConstValue::Uint(u) => Some(*u as f64),
            ConstValue::Float(f) => Some(*f),
            ConstValue::Bool(_) | ConstValue::Str(_) | ConstValue::Complex(_, _) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConstValue::Int(i) => i64::try_from(*i).ok(),
            ConstValue::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Real part of a number, for non-complex numbers this is the number itself.
    pub fn real(&self) -> Option<f64> {
        match self {
            ConstValue::Complex(re, _) => Some(*re),
            _ => self.as_f64(),
        }
    }

    /// Imaginary part of a number, zero for non-complex numbers.
    pub fn imag(&self) -> Option<f64> {
        match self {
            ConstValue::Complex(_, im) => Some(*im),
            _ => self.as_f64().map(|_| 0.0),
        }
    }
}

impl Display for ConstValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Bool(b) => f.write_fmt(format_args!("{b}")),
            ConstValue::Int(i) => f.write_fmt(format_args!("{i}")),
            ConstValue::Uint(u) => f.write_fmt(format_args!("{u}")),
            ConstValue::Float(float) => f.write_fmt(format_args!("{float}")),
            ConstValue::Str(s) => f.write_fmt(format_args!("{s:?}")),
            ConstValue::Complex(re, im) => f.write_fmt(format_args!("({re} + {im}i)")),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
struct NamedConstant {
    name: String,
    value: i64,
    single_bit: bool,
}

/// Named constants declared for a user type (c-style enumerators, bit flags).
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ConstantType {
    values: Vec<NamedConstant>,
}

impl ConstantType {
    pub fn new(values: impl IntoIterator<Item = (impl ToString, i64)>) -> Self {
        let values = values
            .into_iter()
            .map(|(name, value)| NamedConstant {
                name: name.to_string(),
                value,
                single_bit: value > 0 && value & (value - 1) == 0,
            })
            .sorted_by_key(|c| c.value)
            .collect();
        Self { values }
    }

    /// Return constant name for a number, or an `A|B` combination if the number is
    /// a union of single bit constants.
    pub fn describe(&self, n: i64) -> Option<String> {
        if let Some(c) = self.values.iter().find(|c| c.value == n) {
            return Some(c.name.clone());
        }
        if n == 0 {
            return None;
        }

        let mut rest = n;
        let mut fields = vec![];
        for c in self.values.iter().filter(|c| c.single_bit) {
            if rest & c.value != 0 {
                fields.push(c.name.as_str());
                rest &= !c.value;
            }
        }
        (rest == 0).then(|| fields.join("|"))
    }
}

/// Structure of a type without a name.
#[derive(Clone, PartialEq, Debug)]
pub enum TypeShape {
    Void,
    Basic(String),
    Pointer(Box<DwarfType>),
    Array { len: u64, elem: Box<DwarfType> },
    Slice(Box<DwarfType>),
    Struct(Vec<(String, DwarfType)>),
    Func {
        params: Vec<DwarfType>,
        ret: Option<Box<DwarfType>>,
    },
}

/// Type of a variable from debug information.
#[derive(Clone, PartialEq, Debug)]
pub struct DwarfType {
    pub name: Option<String>,
    pub shape: TypeShape,
}

impl DwarfType {
    pub fn named(name: impl ToString, shape: TypeShape) -> Self {
        Self {
            name: Some(name.to_string()),
            shape,
        }
    }

    pub fn unnamed(shape: TypeShape) -> Self {
        Self { name: None, shape }
    }

    /// Explicit type name if exists and not empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// True for an unnamed pointer to void.
    pub fn is_void_pointer(&self) -> bool {
        match &self.shape {
            TypeShape::Pointer(target) => target.name().is_none() && target.shape == TypeShape::Void,
            _ => false,
        }
    }
}

impl Display for DwarfType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }

        match &self.shape {
            TypeShape::Void => f.write_str("void"),
            TypeShape::Basic(name) => f.write_str(name),
            TypeShape::Pointer(target) => f.write_fmt(format_args!("*const {target}")),
            TypeShape::Array { len, elem } => f.write_fmt(format_args!("[{elem}; {len}]")),
            TypeShape::Slice(elem) => f.write_fmt(format_args!("&[{elem}]")),
            TypeShape::Struct(fields) => {
                if fields.is_empty() {
                    return f.write_str("struct {}");
                }
                let body = fields
                    .iter()
                    .map(|(name, ty)| format!("{name}: {ty}"))
                    .join(", ");
                f.write_fmt(format_args!("struct {{ {body} }}"))
            }
            TypeShape::Func { params, ret } => {
                let params = params.iter().join(", ");
                match ret {
                    None => f.write_fmt(format_args!("fn({params})")),
                    Some(ret) => f.write_fmt(format_args!("fn({params}) -> {ret}")),
                }
            }
        }
    }
}

bitflags! {
    /// Variable properties.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    pub struct VariableFlags: u16 {
        /// Variable escapes to the heap.
        const ESCAPED = 1 << 0;
        /// Variable is shadowed by another variable with the same name.
        const SHADOWED = 1 << 1;
        /// Variable is a constant.
        const CONSTANT = 1 << 2;
        /// Variable is a function argument.
        const ARGUMENT = 1 << 3;
        /// Variable is a function return value.
        const RETURN_ARGUMENT = 1 << 4;
        /// Variable address is synthesized by the debugger.
        const FAKE_ADDRESS = 1 << 5;
    }
}

impl Default for VariableFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Runtime value loaded from the debugee memory.
///
/// Children are loaded up to the limits of a load configuration, a missing value without
/// an error means that value intentionally not loaded.
#[derive(Clone, Debug, Default)]
pub struct Variable {
    pub addr: RelocatedAddress,
    /// Only address of the variable is known.
    pub only_addr: bool,
    pub name: String,
    pub kind: Kind,
    /// Declared type.
    pub dwarf_type: Option<DwarfType>,
    /// Type after typedef resolution.
    pub real_type: Option<DwarfType>,
    pub value: Option<ConstValue>,
    pub float_special: FloatSpecial,
    /// Reason why value can not be read.
    pub unreadable: Option<Error>,
    pub len: i64,
    pub cap: i64,
    pub flags: VariableFlags,
    /// Address of the underlying data for strings, slices, maps, etc.
    pub base: u64,
    pub location_expr: String,
    pub decl_line: i64,
    /// Named constants of a variable type.
    pub consts: Option<ConstantType>,
    pub children: Vec<Variable>,
}

impl Variable {
    /// Return a symbolic description of an integer value using constants of its type.
    /// Builtin types never described.
    pub fn const_descr(&self) -> Option<String> {
        if !self.kind.is_integer() {
            return None;
        }
        let consts = self.consts.as_ref()?;
        let type_name = self.dwarf_type.as_ref()?.name()?;
        if !type_name.contains("::") {
            return None;
        }

        consts.describe(self.value.as_ref()?.as_i64()?)
    }
}
