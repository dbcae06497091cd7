//! Black-box pipeline tests: a literal Scar source string goes in,
//! substrings of the emitted C text come out. One test per concrete
//! scenario, plus the suite's universal properties.

use std::path::Path;

use scarc::cleaner::clean;
use scarc::hoister::hoist;
use scarc::parser::parse_program;
use scarc::pipeline::compile_source;

fn emit(source: &str) -> String {
    compile_source(source, "t.scar", Path::new(".")).expect("pipeline should succeed").c_source
}

#[test]
fn for_loop_lowers_to_c_for_with_inclusive_bound() {
    let c = emit("for i = 0 to 3:\n    print \"looping\"\n");
    assert!(c.contains("for (int i = 0; i <= 3; i++) {"));
    assert!(c.contains("printf(\"looping\\n\");"));
}

#[test]
fn class_constructor_and_object_construction() {
    let source = "class Cat:\n    init():\n        string this.name = \"Fluffy\"\nCat fluffy = new Cat()\n";
    let c = emit(source);
    assert!(c.contains("typedef struct Cat Cat;"));
    assert!(c.contains("Cat* Cat_new();"));
    assert!(c.contains("strcpy(this->name, \"Fluffy\");"));
    assert!(c.contains("Cat* fluffy = Cat_new();"));
}

#[test]
fn hoisted_function_prototype_precedes_main_and_call_site() {
    let source = "calculate(5)\nfn calculate(int n):\n    print n\n";
    let c = emit(source);
    let prototype_idx = c.find("void calculate(int n);").expect("prototype missing");
    let main_idx = c.find("int main(void)").expect("main missing");
    let call_idx = c.find("calculate(5);").expect("call site missing");
    assert!(prototype_idx < main_idx);
    assert!(call_idx > main_idx);
}

#[test]
fn empty_map_literal_lowers_to_parallel_arrays() {
    let c = emit("map[string:int] m = []\n");
    assert!(c.contains("char m_keys[10][256];"));
    assert!(c.contains("int m_values[10];"));
    assert!(c.contains("int m_size = 0;"));
}

#[test]
fn parallel_for_emits_omp_pragma_immediately_before_the_loop() {
    let c = emit("parallel for i = 1 to 5:\n    print i\n");
    let pragma_idx = c.find("#pragma omp parallel for").expect("pragma missing");
    let for_idx = c.find("for (int i = 1; i <= 5; i++)").expect("for missing");
    let between = &c[pragma_idx + "#pragma omp parallel for".len()..for_idx];
    assert!(between.trim().is_empty(), "pragma must immediately precede the loop, found {between:?} in between");
}

#[test]
fn string_returning_function_uses_out_buffer_convention() {
    let source = "fn greeting() -> string:\n    string buffer = \"hi\"\n    return buffer\n";
    let c = emit(source);
    assert!(c.contains("void greeting(char* _output_buffer);"));
    assert!(c.contains("strcpy(_output_buffer, buffer); return;"));
}

#[test]
fn idempotent_cleaning() {
    let source = "# a comment\nvar int x = 1 # trailing\nprint x\n";
    let once = clean(source);
    let twice = clean(&once);
    assert_eq!(once, twice);
}

#[test]
fn cleaning_preserves_line_count() {
    let source = "# header\nvar int x = 1\n\nprint x # trailing\n";
    assert_eq!(source.matches('\n').count(), clean(source).matches('\n').count());
}

#[test]
fn parser_reports_the_real_line_number_past_leading_blanks() {
    let source = "\n\n\nvar weird decl here\n";
    let err = parse_program(&clean(source), "t.scar").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("4"), "expected line 4 in error, got: {message}");
}

#[test]
fn hoist_keeps_non_function_statements_before_the_function_block() {
    let source = "print \"start\"\nfn helper():\n    print \"helper\"\nprint \"end\"\n";
    let program = parse_program(&clean(source), "t.scar").unwrap();
    let hoisted = hoist(program.statements).unwrap();
    let first_function = hoisted.iter().position(|s| matches!(s, scarc::ast::Statement::TopLevelFuncDecl(_)));
    let last_non_function = hoisted.iter().rposition(|s| !matches!(s, scarc::ast::Statement::TopLevelFuncDecl(_)));
    assert!(first_function.unwrap() > last_non_function.unwrap());
}

#[test]
fn hoisted_function_bodies_emit_callee_before_caller() {
    let source = "fn aCaller():\n    zCallee()\nfn zCallee():\n    print \"callee\"\naCaller()\n";
    let c = emit(source);
    let callee_body_idx = c.find("void zCallee() {").expect("zCallee body missing");
    let caller_body_idx = c.find("void aCaller() {").expect("aCaller body missing");
    assert!(
        callee_body_idx < caller_body_idx,
        "zCallee's body must precede aCaller's, since hoisting orders callees before callers"
    );
}

#[test]
fn this_dot_rewrite_never_touches_string_literal_contents() {
    let source = "class Greeter:\n    init():\n        string this.greeting = \"this.is.not.a.field\"\n";
    let c = emit(source);
    assert!(c.contains("\"this.is.not.a.field\""));
}
