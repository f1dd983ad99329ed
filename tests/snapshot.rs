use serde_json::json;
use stalker_snapshot::api;
use stalker_snapshot::debugger::address::RelocatedAddress;
use stalker_snapshot::debugger::expr::{BinaryOp, Expr, Literal};
use stalker_snapshot::debugger::variable::VariableFlags;
use stalker_snapshot::debugger::{
    Amd64, Breakpoint, BreakpointState, ConstValue, DwarfRegister, DwarfRegisters, FloatSpecial,
    Function, Kind, Location, Thread, Variable,
};
use stalker_snapshot::Error;
use std::collections::HashMap;

struct StoppedThread {
    bp: BreakpointState,
}

impl Thread for StoppedThread {
    fn thread_id(&self) -> u32 {
        1001
    }

    fn location(&self) -> Result<Location, Error> {
        Ok(Location {
            pc: RelocatedAddress::from(0x55555555BD63_usize),
            file: "/app/src/main.rs".to_string(),
            line: 15,
            function: Some(Function {
                name: "app::main".to_string(),
                entry: RelocatedAddress::from(0x55555555BD00_usize),
                optimized: false,
            }),
        })
    }

    fn breakpoint(&self) -> &BreakpointState {
        &self.bp
    }

    fn task_id(&self) -> Result<Option<u64>, Error> {
        Err(Error::NoTask(1001))
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_thread_snapshot_json() {
    init_logger();

    let thread = StoppedThread {
        bp: BreakpointState {
            breakpoint: Some(Breakpoint {
                logical_id: 1,
                addr: RelocatedAddress::from(0x55555555BD63_usize),
                file: "/app/src/main.rs".to_string(),
                line: 15,
                function_name: "app::main".to_string(),
                cond: Some(Expr::binary(
                    BinaryOp::Lt,
                    Expr::ident("n"),
                    Expr::Literal(Literal::Int(3)),
                )),
                total_hit_count: 1,
                hit_count: HashMap::from([(0, 1)]),
                ..Default::default()
            }),
            active: true,
        },
    };

    let snapshot = api::convert_thread(&thread);
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["id"], json!(1001));
    assert_eq!(value["pc"], json!(0x55555555BD63_u64));
    assert_eq!(value["task_id"], json!(0));
    assert_eq!(
        value["function"],
        json!({
            "name": "app::main",
            "type": 0,
            "value": 0x55555555BD00_u64,
            "runtime_type": 0,
            "optimized": false,
        })
    );
    assert_eq!(value["breakpoint"]["cond"], json!("n < 3"));
    assert_eq!(value["breakpoint"]["addrs"], json!([0x55555555BD63_u64]));
    assert_eq!(value["breakpoint"]["hit_count"], json!({"0": 1}));
    assert_eq!(value["breakpoint"]["load_args"], json!(null));

    let back: api::Thread = serde_json::from_value(value).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_variable_snapshot_json() {
    init_logger();

    let var = Variable {
        name: "point".to_string(),
        addr: RelocatedAddress::from(0x7ffe_0000_u64),
        kind: Kind::Struct,
        flags: VariableFlags::ARGUMENT,
        len: 2,
        children: vec![
            Variable {
                name: "x".to_string(),
                kind: Kind::Float64,
                value: Some(ConstValue::Float(0.0)),
                float_special: FloatSpecial::NaN,
                ..Default::default()
            },
            Variable {
                name: "z".to_string(),
                kind: Kind::Complex128,
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let snapshot = api::convert_var(&var);
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["name"], json!("point"));
    assert_eq!(value["kind"], json!("struct"));
    assert_eq!(value["type"], json!(""));
    assert_eq!(value["children"][0]["value"], json!("NaN"));
    assert_eq!(value["children"][0]["kind"], json!("float64"));
    assert_eq!(value["children"][1]["len"], json!(2));
    assert_eq!(value["children"][1]["children"][0]["name"], json!("real"));
    assert_eq!(value["children"][1]["children"][0]["value"], json!("nil"));
    assert_eq!(value["children"][1]["children"][1]["name"], json!("imaginary"));
    assert_eq!(value["children"][1]["children"][1]["value"], json!("nil"));

    let back: api::Variable = serde_json::from_value(value).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_logical_breakpoints_and_registers() {
    init_logger();

    let bps: Vec<Breakpoint> = [(1, 0x10), (1, 0x20), (2, 0x30)]
        .into_iter()
        .map(|(logical_id, addr)| Breakpoint {
            logical_id,
            addr: RelocatedAddress::from(addr as u64),
            ..Default::default()
        })
        .collect();
    let logical = api::convert_breakpoints(&bps);
    let addrs: Vec<Vec<u64>> = logical.iter().map(|bp| bp.addrs.clone()).collect();
    assert_eq!(addrs, vec![vec![0x10, 0x20], vec![0x30]]);

    let mut regs = DwarfRegisters::default();
    regs.insert(16, DwarfRegister::from_u64(0x10));
    regs.insert(33, DwarfRegister::from_bytes(vec![0; 10]));
    let registers = api::convert_registers(&regs, &Amd64, false);
    assert_eq!(
        serde_json::to_value(&registers).unwrap(),
        json!([{"name": "rip", "value": "0x0000000000000010", "dwarf_number": 16}])
    );
}
