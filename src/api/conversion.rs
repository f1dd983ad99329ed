use crate::api::types as api;
use crate::debugger;
use crate::debugger::register::{Arch, DwarfRegisters};
use crate::debugger::variable::{ConstValue, DwarfType, FloatSpecial, FloatWidth, ValueClass};
use crate::debugger::{Breakpoint, Thread};
use crate::muted_error;

/// Name of an unnamed pointer to void.
const OPAQUE_POINTER: &str = "*const c_void";

/// Render a float number using the shortest representation that round trips
/// at the given bit width.
pub fn format_float(value: f64, width: FloatWidth) -> String {
    match width {
        FloatWidth::W32 => {
            // out of range values become infinite here
            let value = value as f32;
            if value.is_finite() {
                return value.to_string();
            }
        }
        FloatWidth::W64 => {
            if value.is_finite() {
                return value.to_string();
            }
        }
    }

    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "+Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

fn convert_float_value(var: &debugger::Variable, width: FloatWidth) -> String {
    match var.float_special {
        FloatSpecial::PosInf => return "+Inf".to_string(),
        FloatSpecial::NegInf => return "-Inf".to_string(),
        FloatSpecial::NaN => return "NaN".to_string(),
        FloatSpecial::None => {}
    }

    let value = var
        .value
        .as_ref()
        .and_then(ConstValue::as_f64)
        .unwrap_or_default();
    format_float(value, width)
}

/// Render variable value, return an empty string if value is not loaded.
pub fn format_value(var: &debugger::Variable) -> String {
    let Some(value) = var.value.as_ref() else {
        return String::new();
    };

    match var.kind.class() {
        ValueClass::Float(width) => convert_float_value(var, width),
        ValueClass::Text => value
            .as_str()
            .map(ToString::to_string)
            .unwrap_or_else(|| value.to_string()),
        ValueClass::Complex(_) | ValueClass::Structured => match var.const_descr() {
            Some(descr) => format!("{descr} ({value})"),
            None => value.to_string(),
        },
    }
}

fn pretty_type_name(ty: Option<&DwarfType>) -> String {
    let Some(ty) = ty else {
        return String::new();
    };
    if let Some(name) = ty.name() {
        return name.to_string();
    }
    if ty.is_void_pointer() {
        return OPAQUE_POINTER.to_string();
    }
    ty.to_string()
}

fn complex_children(value: Option<&ConstValue>, width: FloatWidth) -> Vec<api::Variable> {
    let (real, imag) = match value {
        Some(value) => (
            format_float(value.real().unwrap_or_default(), width),
            format_float(value.imag().unwrap_or_default(), width),
        ),
        None => ("nil".to_string(), "nil".to_string()),
    };

    [("real", real), ("imaginary", imag)]
        .into_iter()
        .map(|(name, value)| api::Variable {
            name: name.to_string(),
            kind: width.float_kind(),
            value,
            ..Default::default()
        })
        .collect()
}

/// Convert a loaded variable (and all its loaded children) into a client representation.
pub fn convert_var(var: &debugger::Variable) -> api::Variable {
    let mut r = api::Variable {
        name: var.name.clone(),
        addr: var.addr.as_u64(),
        only_addr: var.only_addr,
        r#type: pretty_type_name(var.dwarf_type.as_ref()),
        real_type: pretty_type_name(var.real_type.as_ref()),
        flags: var.flags,
        kind: var.kind,
        value: format_value(var),
        len: var.len,
        cap: var.cap,
        children: vec![],
        base: var.base,
        unreadable: String::new(),
        location_expr: var.location_expr.clone(),
        decl_line: var.decl_line,
    };

    if let Some(err) = var.unreadable.as_ref() {
        r.unreadable = err.to_string();
    }

    match var.kind.class() {
        ValueClass::Complex(width) => {
            r.len = 2;
            r.children = complex_children(var.value.as_ref(), width);
        }
        ValueClass::Float(_) | ValueClass::Text | ValueClass::Structured => {
            r.children = var.children.iter().map(convert_var).collect();
        }
    }

    r
}

/// Convert a function, [`None`] stays [`None`].
pub fn convert_function(function: Option<&debugger::Function>) -> Option<api::Function> {
    let function = function?;
    Some(api::Function {
        name: function.name.clone(),
        r#type: 0,
        value: function.entry.as_u64(),
        runtime_type: 0,
        optimized: function.optimized,
    })
}

pub fn convert_location(loc: &debugger::Location) -> api::Location {
    api::Location {
        pc: loc.pc.as_u64(),
        file: loc.file.clone(),
        line: loc.line,
        function: convert_function(loc.function.as_ref()),
    }
}

impl From<&api::LoadConfig> for debugger::LoadConfig {
    fn from(cfg: &api::LoadConfig) -> Self {
        Self {
            follow_pointers: cfg.follow_pointers,
            max_variable_recurse: cfg.max_variable_recurse,
            max_string_len: cfg.max_string_len,
            max_array_values: cfg.max_array_values,
            max_struct_fields: cfg.max_struct_fields,
            // chosen by the engine
            max_map_buckets: 0,
        }
    }
}

impl From<&debugger::LoadConfig> for api::LoadConfig {
    fn from(cfg: &debugger::LoadConfig) -> Self {
        Self {
            follow_pointers: cfg.follow_pointers,
            max_variable_recurse: cfg.max_variable_recurse,
            max_string_len: cfg.max_string_len,
            max_array_values: cfg.max_array_values,
            max_struct_fields: cfg.max_struct_fields,
        }
    }
}

pub fn load_config_to_engine(cfg: Option<&api::LoadConfig>) -> Option<debugger::LoadConfig> {
    cfg.map(Into::into)
}

pub fn load_config_from_engine(cfg: Option<&debugger::LoadConfig>) -> Option<api::LoadConfig> {
    cfg.map(Into::into)
}

/// Convert a single physical breakpoint into a logical one.
pub fn convert_breakpoint(bp: &Breakpoint) -> api::Breakpoint {
    api::Breakpoint {
        id: bp.logical_id,
        name: bp.name.clone(),
        addr: bp.addr.as_u64(),
        addrs: vec![bp.addr.as_u64()],
        file: bp.file.clone(),
        line: bp.line,
        function_name: bp.function_name.clone(),
        cond: bp.cond.as_ref().map(ToString::to_string).unwrap_or_default(),
        tracepoint: bp.tracepoint,
        trace_return: bp.trace_return,
        stacktrace: bp.stacktrace,
        task: bp.task,
        variables: bp.variables.clone(),
        load_args: load_config_from_engine(bp.load_args.as_ref()),
        load_locals: load_config_from_engine(bp.load_locals.as_ref()),
        hit_count: bp
            .hit_count
            .iter()
            .map(|(task_id, count)| (task_id.to_string(), *count))
            .collect(),
        total_hit_count: bp.total_hit_count,
    }
}

/// Merge physical breakpoints into logical breakpoints.
///
/// Hit counts are taken from the first physical breakpoint of each logical breakpoint.
///
/// # Panics
///
/// Breakpoints must be sorted by logical id, panics otherwise.
pub fn convert_breakpoints<'a>(
    bps: impl IntoIterator<Item = &'a Breakpoint>,
) -> Vec<api::Breakpoint> {
    let bps = bps.into_iter();
    let mut result: Vec<api::Breakpoint> = Vec::with_capacity(bps.size_hint().0);
    let mut physical_count = 0;

    for bp in bps {
        physical_count += 1;
        if let Some(last) = result.last_mut() {
            if last.id == bp.logical_id {
                last.addrs.push(bp.addr.as_u64());
                continue;
            }
            if last.id > bp.logical_id {
                panic!(
                    "input not sorted: breakpoint {} goes after {}",
                    bp.logical_id, last.id
                );
            }
        }
        result.push(convert_breakpoint(bp));
    }

    log::debug!(
        target: "api",
        "{physical_count} physical breakpoints merged into {} logical",
        result.len()
    );
    result
}

/// Convert a thread. Errors while reading thread location or task are ignored,
/// corresponding fields stay zeroed.
pub fn convert_thread<T: Thread + ?Sized>(thread: &T) -> api::Thread {
    let mut r = api::Thread {
        id: thread.thread_id(),
        ..Default::default()
    };

    if let Some(loc) = muted_error!(thread.location(), "thread location:") {
        r.pc = loc.pc.as_u64();
        r.file = loc.file;
        r.line = loc.line;
        r.function = convert_function(loc.function.as_ref());
    }

    r.breakpoint = thread
        .breakpoint()
        .active_breakpoint()
        .map(convert_breakpoint);

    r.task_id = muted_error!(thread.task_id(), "thread task:")
        .flatten()
        .unwrap_or_default();

    r
}

pub fn convert_task(task: &debugger::Task) -> api::Task {
    api::Task {
        id: task.id,
        current_loc: convert_location(&task.current_loc),
        user_current_loc: convert_location(task.user_current()),
        spawn_loc: convert_location(&task.spawn_loc),
        start_loc: convert_location(&task.start_loc),
        thread_id: task.thread_id.unwrap_or_default(),
        labels: task.labels.clone(),
        unreadable: task
            .unreadable
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

/// Convert an instruction, `text` is an instruction in a client chosen assembly syntax.
pub fn convert_asm_instruction(inst: &debugger::AsmInstruction, text: &str) -> api::AsmInstruction {
    api::AsmInstruction {
        loc: convert_location(&inst.loc),
        dest_loc: inst.dest_loc.as_ref().map(convert_location),
        text: text.to_string(),
        bytes: inst.bytes.clone(),
        breakpoint: inst.breakpoint,
        at_pc: inst.at_pc,
    }
}

/// Convert known registers, floating point registers are included only if `floating_point` is set.
pub fn convert_registers<A: Arch + ?Sized>(
    regs: &DwarfRegisters,
    arch: &A,
    floating_point: bool,
) -> Vec<api::Register> {
    (0..regs.len())
        .filter_map(|number| {
            let reg = regs.reg(number)?;
            let (name, fp, repr) = arch.dwarf_register_to_string(number, reg);
            if fp && !floating_point {
                return None;
            }
            Some(api::Register {
                name,
                value: repr,
                dwarf_number: number,
            })
        })
        .collect()
}

impl From<&debugger::Image> for api::Image {
    fn from(image: &debugger::Image) -> Self {
        Self {
            path: image.path.clone(),
            address: image.static_base,
        }
    }
}

impl From<debugger::Checkpoint> for api::Checkpoint {
    fn from(cp: debugger::Checkpoint) -> Self {
        let debugger::Checkpoint { id, when, r#where } = cp;
        Self { id, when, r#where }
    }
}
