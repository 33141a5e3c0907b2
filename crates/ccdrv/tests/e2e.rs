//! End-to-end scenarios from spec.md §8, checked at the level of "would
//! assemble to the right thing" (idivq/call printf/label/jump shapes) since
//! this crate never invokes an external assembler or linker.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".c").tempfile().expect("create temp source file");
    write!(f, "{contents}").unwrap();
    f
}

fn cc() -> Command {
    Command::cargo_bin("cc").expect("built binary")
}

#[test]
fn scenario_1_sequential_prints_and_addition() {
    let f = source_file(
        r#"int main(){int a=10;int b=5;printf("a: %d\n",a);printf("b: %d\n",b);printf("c: %d\n",a+b);return 0;}"#,
    );
    cc().arg(f.path()).assert().success().stdout(predicate::str::contains("call printf")).stdout(predicate::str::contains("addq"));
}

#[test]
fn scenario_2_division() {
    let f = source_file(r#"int main(){int a=10;int b=5;printf("g: %d\n",a/b);return 0;}"#);
    cc().arg(f.path()).assert().success().stdout(predicate::str::contains("idivq"));
}

#[test]
fn scenario_3_function_call_with_args() {
    let f = source_file(
        r#"int add(int a,int b){int r=a+b;return r;} int main(){int a=add(1,2);printf("a: %d\n",a);return 0;}"#,
    );
    cc()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("add:"))
        .stdout(predicate::str::contains("call add"));
}

#[test]
fn scenario_4_if_else_and_equality() {
    let f = source_file(
        r#"int main(){int a=5;int b=5;int c=3;if(a==b){printf("eq\n");}else{printf("neq\n");}if(a==c){printf("eq\n");}else{printf("neq\n");}return 0;}"#,
    );
    cc()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sete"))
        .stdout(predicate::str::contains(".Lelse"))
        .stdout(predicate::str::contains("je "));
}

#[test]
fn scenario_5_while_loop() {
    let f = source_file(r#"int main(){int i=0;while(i!=3){printf("i=%d\n",i);i=i+1;}return 0;}"#);
    cc()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("setne"))
        .stdout(predicate::str::contains(".Lwhile_start"))
        .stdout(predicate::str::contains("jmp"));
}

#[test]
fn scenario_6_define_substitution() {
    let f = source_file("#define K 3\nint main(){printf(\"%d\\n\",K);return 0;}");
    cc().arg(f.path()).assert().success().stdout(predicate::str::contains("$3"));
}

#[test]
fn scenario_7_six_args_and_nested_call() {
    let f = source_file(
        r#"int f(int a,int b,int c,int d,int e,int g){return a+b+c+d+e+g;} int add(int a,int b){return a+b;} int main(){printf("%d\n",f(1,2,3,4,5,add(6,7)));return 0;}"#,
    );
    cc()
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("call f"))
        .stdout(predicate::str::contains("call add"));
}

#[test]
fn scenario_8_precedence_multiply_before_add() {
    let f = source_file(r#"int main(){int a=3;int b=4;printf("%d\n",a+b*2);return 0;}"#);
    cc().arg(f.path()).assert().success().stdout(predicate::str::contains("imulq")).stdout(predicate::str::contains("addq"));
}

#[test]
fn missing_main_is_a_fatal_error() {
    let f = source_file("int f(){return 0;}");
    cc().arg(f.path()).assert().failure().code(1).stderr(predicate::str::contains("main"));
}

#[test]
fn duplicate_function_is_a_fatal_error() {
    let f = source_file("int f(){return 0;} int f(){return 1;} int main(){return 0;}");
    cc().arg(f.path()).assert().failure().code(1);
}

#[test]
fn unterminated_string_is_a_fatal_error() {
    let f = source_file("int main(){printf(\"unterminated); return 0;}");
    cc().arg(f.path()).assert().failure().code(1);
}

#[test]
fn print_tokens_dumps_and_exits_before_codegen() {
    let f = source_file("int main(){return 0;}");
    cc().arg(f.path()).arg("--print-tokens").assert().success().stdout(predicate::str::contains("Int"));
}

#[test]
fn print_ast_dumps_and_exits_before_codegen() {
    let f = source_file("int main(){return 0;}");
    cc().arg(f.path()).arg("--print-ast").assert().success().stdout(predicate::str::contains("Function"));
}

#[test]
fn print_sema_dumps_and_exits_before_codegen() {
    let f = source_file("int main(){return 0;}");
    cc().arg(f.path()).arg("--print-sema").assert().success().stdout(predicate::str::contains("SymbolTable"));
}

#[test]
fn two_print_flags_is_a_usage_error() {
    let f = source_file("int main(){return 0;}");
    cc().arg(f.path()).arg("--print-ast").arg("--print-tokens").assert().failure().code(1);
}

#[test]
fn missing_input_file_is_an_io_error() {
    cc().arg("/nonexistent/path/does-not-exist.c").assert().failure().code(1);
}

#[test]
fn no_arguments_is_a_fatal_error() {
    cc().assert().failure().code(1);
}

#[test]
fn two_positional_arguments_is_a_fatal_error() {
    let a = source_file("int main(){return 0;}");
    let b = source_file("int main(){return 0;}");
    cc().arg(a.path()).arg(b.path()).assert().failure().code(1);
}
