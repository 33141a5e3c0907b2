//! ccsem — builds symbol tables and assigns stack offsets (spec §4.3).

mod analyzer;
mod error;
mod scope;

pub use analyzer::analyze;
pub use error::SemaError;
pub use scope::{Entry, FunctionEntry, ScopeId, SymbolTable, VariableEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use ccutil::{Arena, Interner};

    fn analyze_src(src: &str) -> Result<(), SemaError> {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let tokens = cclex::tokenize(src).unwrap();
        let program = ccpar::parse(tokens, src, &arena, &mut interner).unwrap();
        analyze(&program, &mut interner).map(|_| ())
    }

    #[test]
    fn accepts_minimal_main() {
        analyze_src("int main() { return 0; }").unwrap();
    }

    #[test]
    fn missing_main_is_fatal() {
        let err = analyze_src("int f() { return 0; }").unwrap_err();
        assert!(matches!(err, SemaError::MissingMain));
    }

    #[test]
    fn duplicate_function_is_fatal() {
        let err = analyze_src("int f() { return 0; } int f() { return 1; } int main() { return 0; }").unwrap_err();
        assert!(matches!(err, SemaError::Redeclaration { .. }));
    }

    #[test]
    fn duplicate_local_is_fatal() {
        let err = analyze_src("int main() { int a = 1; int a = 2; return 0; }").unwrap_err();
        assert!(matches!(err, SemaError::Redeclaration { .. }));
    }

    #[test]
    fn unknown_identifier_is_fatal() {
        let err = analyze_src("int main() { return x; }").unwrap_err();
        assert!(matches!(err, SemaError::UnknownIdentifier { .. }));
    }

    #[test]
    fn unknown_function_call_is_fatal() {
        let err = analyze_src("int main() { frobnicate(); return 0; }").unwrap_err();
        assert!(matches!(err, SemaError::UnknownFunction { .. }));
    }

    #[test]
    fn printf_is_always_accepted_without_declaration() {
        analyze_src(r#"int main() { printf("hi\n"); return 0; }"#).unwrap();
    }

    #[test]
    fn forward_call_to_later_function_is_unresolved() {
        // sema is a single forward pass: `main` (first) cannot see `helper`
        // (declared after it) since helper isn't registered globally yet.
        let err = analyze_src("int main() { helper(); return 0; } int helper() { return 0; }").unwrap_err();
        assert!(matches!(err, SemaError::UnknownFunction { .. }));
    }

    #[test]
    fn params_and_locals_get_distinct_offsets() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let src = "int add(int a, int b) { int c = a + b; return c; } int main() { return add(1, 2); }";
        let tokens = cclex::tokenize(src).unwrap();
        let program = ccpar::parse(tokens, src, &arena, &mut interner).unwrap();
        let table = analyze(&program, &mut interner).unwrap();

        let add_fn = program.functions.iter().find(|f| interner.resolve(f.name) == "add").unwrap();
        let global = table.global();
        // a=-8, b=-16, c=-24 -> align16(24) = 32
        let Entry::Function(entry) = table.resolve(global, add_fn.name).unwrap() else { panic!() };
        assert_eq!(entry.frame_size, 32);
    }

    #[test]
    fn frame_size_is_16_byte_aligned() {
        let arena = Arena::new();
        let mut interner = Interner::new();
        let src = "int f(int a, int b, int c) { return a + b + c; }\nint main() { return f(1, 2, 3); }";
        let tokens = cclex::tokenize(src).unwrap();
        let program = ccpar::parse(tokens, src, &arena, &mut interner).unwrap();
        let table = analyze(&program, &mut interner).unwrap();
        let f = program.functions.iter().find(|f| interner.resolve(f.name) == "f").unwrap();
        let Entry::Function(entry) = table.resolve(table.global(), f.name).unwrap() else { panic!() };
        assert_eq!(entry.frame_size % 16, 0);
        assert!(entry.frame_size >= 24);
    }
}
