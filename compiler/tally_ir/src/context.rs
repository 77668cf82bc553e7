//! The host registry: variables and native functions an expression may use.
//!
//! A [`Context`] is built once by the host and reused across many
//! expression runs. Parsing and type checking only read it; evaluation
//! writes variables through their [`Binding`]s.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{FuncId, Value, ValueType, VarId};

/// Most parameters a native function may declare.
pub const MAX_ARGUMENTS: usize = 8;

/// Storage behind a variable.
pub trait Binding {
    fn get(&self) -> Value;
    fn set(&mut self, value: Value);
}

/// The context owns the value.
impl Binding for Value {
    fn get(&self) -> Value {
        self.clone()
    }

    fn set(&mut self, value: Value) {
        *self = value;
    }
}

/// The host keeps a handle to the same value on its own thread.
impl Binding for Rc<RefCell<Value>> {
    fn get(&self) -> Value {
        self.borrow().clone()
    }

    fn set(&mut self, value: Value) {
        *self.borrow_mut() = value;
    }
}

/// The host shares the value with other threads.
impl Binding for Arc<parking_lot::Mutex<Value>> {
    fn get(&self) -> Value {
        self.lock().clone()
    }

    fn set(&mut self, value: Value) {
        *self.lock() = value;
    }
}

/// Callback behind a registered function.
///
/// Arguments arrive already cast to the declared parameter types.
pub trait NativeFunction {
    fn call(&self, args: &[Value]) -> Value;
}

impl<F> NativeFunction for F
where
    F: Fn(&[Value]) -> Value,
{
    fn call(&self, args: &[Value]) -> Value {
        self(args)
    }
}

/// A named, typed variable.
pub struct VariableDef {
    name: String,
    ty: ValueType,
    read_only: bool,
    binding: Box<dyn Binding>,
}

impl VariableDef {
    /// A variable whose value the context owns.
    pub fn new(name: impl Into<String>, ty: ValueType, initial: impl Into<Value>) -> Self {
        Self::with_binding(name, ty, initial.into())
    }

    /// A variable backed by host storage.
    pub fn with_binding(
        name: impl Into<String>,
        ty: ValueType,
        binding: impl Binding + 'static,
    ) -> Self {
        VariableDef {
            name: name.into(),
            ty,
            read_only: false,
            binding: Box::new(binding),
        }
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> ValueType {
        self.ty
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Current value as stored, not yet cast to [`ty`](Self::ty).
    pub fn get(&self) -> Value {
        self.binding.get()
    }

    pub fn set(&mut self, value: Value) {
        self.binding.set(value);
    }
}

impl fmt::Debug for VariableDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

/// A declared function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub ty: ValueType,
    /// Value used when a call leaves this trailing parameter out.
    pub default: Option<Value>,
}

/// A named native function.
pub struct FunctionDef {
    name: String,
    return_type: ValueType,
    params: SmallVec<[Param; 4]>,
    callback: Box<dyn NativeFunction>,
}

impl FunctionDef {
    pub fn new(
        name: impl Into<String>,
        return_type: ValueType,
        callback: impl NativeFunction + 'static,
    ) -> Self {
        FunctionDef {
            name: name.into(),
            return_type,
            params: SmallVec::new(),
            callback: Box::new(callback),
        }
    }

    /// Append a required parameter.
    #[must_use]
    pub fn param(mut self, ty: ValueType) -> Self {
        self.params.push(Param { ty, default: None });
        self
    }

    /// Append an optional parameter with its default value.
    #[must_use]
    pub fn optional_param(mut self, ty: ValueType, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            ty,
            default: Some(default.into()),
        });
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn return_type(&self) -> ValueType {
        self.return_type
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declared parameter count.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameters a call must supply.
    pub fn required_count(&self) -> usize {
        self.params.iter().take_while(|p| p.default.is_none()).count()
    }

    /// Whether a call with `count` arguments can be completed with defaults.
    pub fn accepts(&self, count: usize) -> bool {
        (self.required_count()..=self.arity()).contains(&count)
    }

    pub fn call(&self, args: &[Value]) -> Value {
        self.callback.call(args)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("return_type", &self.return_type)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Why a definition was refused by [`Context`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("`{0}` is not a valid identifier")]
    InvalidName(String),
    #[error("`{0}` is reserved")]
    ReservedName(String),
    #[error("variable `{0}` is already defined")]
    DuplicateVariable(String),
    #[error("function `{name}` taking {arity} argument(s) is already defined")]
    DuplicateFunction { name: String, arity: usize },
    #[error("variable `{name}` is declared `{declared}` but holds a `{found}`")]
    InitialValueType {
        name: String,
        declared: ValueType,
        found: ValueType,
    },
    #[error("function `{0}` declares a `void` parameter")]
    VoidParameter(String),
    #[error("function `{name}` declares {count} parameters, the limit is {MAX_ARGUMENTS}")]
    TooManyParameters { name: String, count: usize },
    #[error("function `{0}` declares a required parameter after an optional one")]
    RequiredAfterOptional(String),
    #[error("default for parameter {index} of `{name}` is `{found}`, expected `{expected}`")]
    DefaultType {
        name: String,
        index: usize,
        expected: ValueType,
        found: ValueType,
    },
}

/// Why no function matched a call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArityMismatch {
    /// No function has this name.
    Unknown,
    /// Every same-named function takes fewer arguments.
    TooMany { max: usize },
    /// No same-named function can be called with this few arguments.
    Missing { min: usize },
}

/// Variables and functions visible to expressions.
#[derive(Debug, Default)]
pub struct Context {
    variables: Vec<VariableDef>,
    functions: Vec<FunctionDef>,
    variable_names: FxHashMap<String, VarId>,
    function_names: FxHashMap<String, SmallVec<[FuncId; 2]>>,
    interactive: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable.
    pub fn add_variable(&mut self, def: VariableDef) -> Result<VarId, RegistryError> {
        check_name(&def.name)?;
        if self.variable_names.contains_key(&def.name) {
            return Err(RegistryError::DuplicateVariable(def.name));
        }
        let found = def.get().ty();
        if !found.can_cast_to(def.ty) {
            return Err(RegistryError::InitialValueType {
                name: def.name,
                declared: def.ty,
                found,
            });
        }
        let id = VarId::from_usize(self.variables.len())
            .ok_or_else(|| RegistryError::InvalidName(def.name.clone()))?;
        self.variable_names.insert(def.name.clone(), id);
        self.variables.push(def);
        Ok(id)
    }

    /// Register a function. Several functions may share a name as long as
    /// their declared arities differ.
    pub fn add_function(&mut self, def: FunctionDef) -> Result<FuncId, RegistryError> {
        check_name(&def.name)?;
        if def.arity() > MAX_ARGUMENTS {
            return Err(RegistryError::TooManyParameters {
                name: def.name,
                count: def.params.len(),
            });
        }
        let mut seen_optional = false;
        for (index, param) in def.params.iter().enumerate() {
            if param.ty == ValueType::Void {
                return Err(RegistryError::VoidParameter(def.name));
            }
            match &param.default {
                Some(default) if default.ty() != param.ty => {
                    return Err(RegistryError::DefaultType {
                        name: def.name.clone(),
                        index,
                        expected: param.ty,
                        found: default.ty(),
                    });
                }
                Some(_) => seen_optional = true,
                None if seen_optional => {
                    return Err(RegistryError::RequiredAfterOptional(def.name));
                }
                None => {}
            }
        }
        let same_arity = self
            .functions_named(&def.name)
            .iter()
            .any(|&id| self.functions[id.index()].arity() == def.arity());
        if same_arity {
            return Err(RegistryError::DuplicateFunction {
                arity: def.arity(),
                name: def.name,
            });
        }
        let id = FuncId::from_usize(self.functions.len())
            .ok_or_else(|| RegistryError::InvalidName(def.name.clone()))?;
        self.function_names
            .entry(def.name.clone())
            .or_default()
            .push(id);
        self.functions.push(def);
        Ok(id)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<VarId> {
        self.variable_names.get(name).copied()
    }

    #[inline]
    pub fn variable(&self, id: VarId) -> Option<&VariableDef> {
        self.variables.get(id.index())
    }

    #[inline]
    pub fn variable_mut(&mut self, id: VarId) -> Option<&mut VariableDef> {
        self.variables.get_mut(id.index())
    }

    /// Current value of a variable by name.
    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.lookup_variable(name)
            .and_then(|id| self.variable(id))
            .map(VariableDef::get)
    }

    #[inline]
    pub fn function(&self, id: FuncId) -> Option<&FunctionDef> {
        self.functions.get(id.index())
    }

    pub fn functions_named(&self, name: &str) -> &[FuncId] {
        self.function_names.get(name).map_or(&[], |ids| ids.as_slice())
    }

    /// Pick the function a call `name(..)` with `arg_count` arguments means.
    ///
    /// An exact arity match wins; otherwise the first registered function
    /// whose optional parameters cover the difference.
    pub fn resolve_function(&self, name: &str, arg_count: usize) -> Result<FuncId, ArityMismatch> {
        let candidates = self.functions_named(name);
        if candidates.is_empty() {
            return Err(ArityMismatch::Unknown);
        }
        let defs = candidates
            .iter()
            .map(|&id| (id, &self.functions[id.index()]));
        if let Some((id, _)) = defs.clone().find(|(_, def)| def.arity() == arg_count) {
            return Ok(id);
        }
        if let Some((id, _)) = defs.clone().find(|(_, def)| def.accepts(arg_count)) {
            return Ok(id);
        }
        let max = defs.clone().map(|(_, def)| def.arity()).max().unwrap_or(0);
        if arg_count > max {
            Err(ArityMismatch::TooMany { max })
        } else {
            let min = defs.map(|(_, def)| def.required_count()).min().unwrap_or(0);
            Err(ArityMismatch::Missing { min })
        }
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Enable or disable the interactive shortcut: evaluating an expression
    /// that is just one writable `bool` variable toggles it.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableDef> {
        self.variables.iter()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.iter()
    }
}

/// Whether `name` could be written as an identifier token.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    if !is_identifier(name) {
        return Err(RegistryError::InvalidName(name.to_owned()));
    }
    let reserved = name.eq_ignore_ascii_case("true")
        || name.eq_ignore_ascii_case("false")
        || ValueType::from_name(name).is_some();
    if reserved {
        return Err(RegistryError::ReservedName(name.to_owned()));
    }
    Ok(())
}
