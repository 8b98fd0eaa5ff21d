#[cfg(test)]
mod symbol_table_tests {
    use monkey_runtime as runtime;

    use runtime::error::CoreError;
    use runtime::symbol_table::*;

    fn sym(name: &str, scope: SymbolScope, index: usize) -> Symbol {
        Symbol::new(name, scope, index)
    }

    fn assert_resolves(table: &mut SymbolTable, expected: &[Symbol]) {
        for symbol in expected {
            let resolved = table
                .resolve(&symbol.name)
                .unwrap_or_else(|| panic!("name {} not resolvable", symbol.name));
            assert_eq!(resolved, *symbol, "resolving {}", symbol.name);
        }
    }

    #[test]
    fn test_define_global_indices_follow_call_order() {
        let mut table = SymbolTable::new();

        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            assert_eq!(table.define(name), sym(name, SymbolScope::Global, i));
        }

        assert_eq!(table.num_definitions(), 4);
        assert!(table.is_global());
    }

    #[test]
    fn test_define_in_nested_frames_is_local() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("a"), sym("a", SymbolScope::Global, 0));

        table.enter_scope();
        assert_eq!(table.define("c"), sym("c", SymbolScope::Local, 0));
        assert_eq!(table.define("d"), sym("d", SymbolScope::Local, 1));

        table.enter_scope();
        assert_eq!(table.define("e"), sym("e", SymbolScope::Local, 0));
        assert_eq!(table.depth(), 2);
        assert_eq!(table.num_definitions(), 1);
    }

    #[test]
    fn test_resolve_global() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.define("b");

        assert_resolves(
            &mut table,
            &[
                sym("a", SymbolScope::Global, 0),
                sym("b", SymbolScope::Global, 1),
            ],
        );
    }

    #[test]
    fn test_resolve_across_global_boundary_is_unchanged() {
        let mut table = SymbolTable::new();
        let a = table.define("a");

        table.enter_scope();
        table.enter_scope();
        table.define("c");

        assert_eq!(table.resolve("a"), Some(a));
        assert_eq!(table.resolve("c"), Some(sym("c", SymbolScope::Local, 0)));
        assert!(table.free_symbols().is_empty());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.enter_scope();

        assert_eq!(table.resolve("nope"), None);
        assert!(matches!(
            table.resolve_or_err("nope"),
            Err(CoreError::UndefinedVariable { ref name }) if name == "nope"
        ));
    }

    #[test]
    fn test_define_builtin_does_not_consume_slot() {
        let mut table = SymbolTable::new();
        table.define("x");

        let len = table.define_builtin(5, "len");
        assert_eq!(len, sym("len", SymbolScope::Builtin, 5));
        assert_eq!(table.num_definitions(), 1);

        assert_eq!(table.resolve("len"), Some(sym("len", SymbolScope::Builtin, 5)));
    }

    #[test]
    fn test_builtins_resolve_unchanged_from_any_depth() {
        let mut table = SymbolTable::new();
        let expected = [
            sym("a", SymbolScope::Builtin, 0),
            sym("c", SymbolScope::Builtin, 1),
            sym("e", SymbolScope::Builtin, 2),
        ];
        for symbol in &expected {
            table.define_builtin(symbol.index, &symbol.name);
        }

        table.enter_scope();
        table.enter_scope();

        assert_resolves(&mut table, &expected);
        assert!(table.free_symbols().is_empty());
    }

    #[test]
    fn test_redefinition_gets_fresh_index() {
        let mut table = SymbolTable::new();
        table.define("x");
        table.define("y");

        assert_eq!(table.define("x"), sym("x", SymbolScope::Global, 2));
        assert_eq!(table.resolve("x"), Some(sym("x", SymbolScope::Global, 2)));
        assert_eq!(table.num_definitions(), 3);
    }

    #[test]
    fn test_inner_definition_shadows_outer() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.enter_scope();
        table.define("a");

        assert_eq!(table.resolve("a"), Some(sym("a", SymbolScope::Local, 0)));

        table.leave_scope().unwrap();
        assert_eq!(table.resolve("a"), Some(sym("a", SymbolScope::Global, 0)));
    }

    #[test]
    fn test_resolve_free() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.define("b");

        table.enter_scope();
        table.define("c");
        table.define("d");

        table.enter_scope();
        table.define("e");
        table.define("f");

        assert_resolves(
            &mut table,
            &[
                sym("a", SymbolScope::Global, 0),
                sym("b", SymbolScope::Global, 1),
                sym("c", SymbolScope::Free, 0),
                sym("d", SymbolScope::Free, 1),
                sym("e", SymbolScope::Local, 0),
                sym("f", SymbolScope::Local, 1),
            ],
        );

        assert_eq!(
            table.free_symbols(),
            &[
                sym("c", SymbolScope::Local, 0),
                sym("d", SymbolScope::Local, 1),
            ]
        );
    }

    #[test]
    fn test_resolve_free_is_captured_once() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.define("c");
        table.enter_scope();

        assert_eq!(table.resolve("c"), Some(sym("c", SymbolScope::Free, 0)));
        assert_eq!(table.resolve("c"), Some(sym("c", SymbolScope::Free, 0)));
        assert_eq!(table.free_symbols().len(), 1);
    }

    #[test]
    fn test_resolve_free_three_levels_up() {
        let mut table = SymbolTable::new();
        table.define("g");

        table.enter_scope();
        table.define("outer");

        table.enter_scope();
        table.define("middle");

        table.enter_scope();
        table.define("inner");

        assert_eq!(table.resolve("outer"), Some(sym("outer", SymbolScope::Free, 0)));
        assert_eq!(table.resolve("middle"), Some(sym("middle", SymbolScope::Free, 1)));
        assert_eq!(table.resolve("g"), Some(sym("g", SymbolScope::Global, 0)));

        let innermost = table.leave_scope().unwrap();
        assert_eq!(
            innermost.free_symbols(),
            &[
                sym("outer", SymbolScope::Free, 0),
                sym("middle", SymbolScope::Local, 0),
            ]
        );

        // The intermediate frame captured `outer` on the way through.
        let middle = table.leave_scope().unwrap();
        assert_eq!(
            middle.free_symbols(),
            &[sym("outer", SymbolScope::Local, 0)]
        );
        assert_eq!(
            middle.get("outer"),
            Some(&sym("outer", SymbolScope::Free, 0))
        );
        assert_eq!(middle.num_definitions(), 1);

        let outer = table.leave_scope().unwrap();
        assert!(outer.free_symbols().is_empty());
        assert!(table.is_global());
    }

    #[test]
    fn test_unresolvable_free_leaves_frames_untouched() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.enter_scope();
        table.define("c");
        table.enter_scope();
        table.define("e");

        assert_eq!(table.resolve("b"), None);
        assert_eq!(table.resolve("d"), None);
        assert!(table.free_symbols().is_empty());
    }

    #[test]
    fn test_define_and_resolve_function_name() {
        let mut table = SymbolTable::new();
        table.enter_scope();

        let expected = sym("counter", SymbolScope::Function, 0);
        assert_eq!(table.define_function_name("counter").unwrap(), expected);
        assert_eq!(table.num_definitions(), 0);
        assert_eq!(table.resolve("counter"), Some(expected));
    }

    #[test]
    fn test_shadowing_function_name() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.define_function_name("a").unwrap();
        table.define("a");

        assert_eq!(table.resolve("a"), Some(sym("a", SymbolScope::Local, 0)));
    }

    #[test]
    fn test_function_name_of_enclosing_function_is_captured() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.define_function_name("outer").unwrap();
        table.enter_scope();

        assert_eq!(table.resolve("outer"), Some(sym("outer", SymbolScope::Free, 0)));
        assert_eq!(
            table.free_symbols(),
            &[sym("outer", SymbolScope::Function, 0)]
        );
    }

    #[test]
    fn test_function_name_rejected_in_global_frame() {
        let mut table = SymbolTable::new();

        assert!(matches!(
            table.define_function_name("main"),
            Err(CoreError::FunctionNameAtTopLevel { ref name }) if name == "main"
        ));
        assert_eq!(table.resolve("main"), None);

        // Nothing leaks into nested frames as a capture.
        table.enter_scope();
        assert_eq!(table.resolve("main"), None);
        assert!(table.free_symbols().is_empty());
    }

    #[test]
    fn test_global_builtin_survives_function_frames() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.enter_scope();

        let len = table.define_global_builtin(3, "len");
        assert_eq!(len, sym("len", SymbolScope::Builtin, 3));
        assert_eq!(table.num_definitions(), 0);
        assert_eq!(table.global().get("len"), Some(&len));

        table.leave_scope().unwrap();
        table.leave_scope().unwrap();
        assert_eq!(table.resolve("len"), Some(len));
        assert_eq!(table.global().num_definitions(), 0);
    }

    #[test]
    fn test_leave_global_scope_fails() {
        let mut table = SymbolTable::new();

        assert!(matches!(table.leave_scope(), Err(CoreError::ScopeUnderflow)));

        table.enter_scope();
        table.define("x");
        let frame = table.leave_scope().unwrap();
        assert_eq!(frame.num_definitions(), 1);
        assert!(matches!(table.leave_scope(), Err(CoreError::ScopeUnderflow)));
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(sym("x", SymbolScope::Global, 3).to_string(), "x GLOBAL 3");
        assert_eq!(SymbolScope::Free.to_string(), "FREE");
    }
}
