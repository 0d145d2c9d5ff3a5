//! End-to-end checks: lowered files through a session against the
//! in-memory codebase.

use throwscan_analysis::ast::{CatchClause, Expr, MethodName, Node, SourceFile};
use throwscan_analysis::codebase::Codebase;
use throwscan_analysis::throws::{AnalysisSession, CheckStats, Diagnostic, DiagnosticKind};
use throwscan_core::config::AnalysisConfig;
use throwscan_core::errors::AbstainReason;

fn codebase() -> Codebase {
    let mut cb = Codebase::new();
    cb.class("Throwable", &[])
        .class("Exception", &["Throwable"])
        .class("RuntimeException", &["Exception"])
        .class("LogicException", &["Exception"])
        .class("NotFoundException", &["RuntimeException"])
        .class("Exc", &["Exception"]);
    cb
}

fn throws_only() -> AnalysisConfig {
    AnalysisConfig::default()
}

fn with_calls() -> AnalysisConfig {
    AnalysisConfig {
        check_invoked_callables: Some(true),
        ..Default::default()
    }
}

fn check(cb: &Codebase, config: &AnalysisConfig, items: Vec<Node>) -> (Vec<Diagnostic>, CheckStats) {
    let session = AnalysisSession::new(config, cb, cb);
    let file = SourceFile::new("src/app.php", items);
    let mut diagnostics = Vec::new();
    let stats = session.checker().check_file(&file, &mut diagnostics);
    (diagnostics, stats)
}

fn catch(types: &[&str], line: u32) -> CatchClause {
    CatchClause::new(types, line, Vec::new())
}

// ═══════════════════════════════════════════════════════════════════
// Throw sites
// ═══════════════════════════════════════════════════════════════════

#[test]
fn unguarded_throw_in_undeclared_function_is_absent() {
    let cb = codebase();
    let (diags, stats) = check(
        &cb,
        &throws_only(),
        vec![Node::function("f", 1, vec![Node::throw_new("Exc", 2)])],
    );

    assert_eq!(diags.len(), 1);
    let d = &diags[0];
    assert_eq!(d.kind, DiagnosticKind::ThrowTypeAbsent);
    assert_eq!(d.thrown_type, "Exc");
    assert_eq!(d.function, "f");
    assert_eq!(d.line, 2);
    assert_eq!(d.invoked, None);
    assert_eq!(d.declared, None);
    assert_eq!(
        d.message(),
        "f() can throw Exc here, but has no '@throws' declarations for that class"
    );
    assert_eq!(stats.throw_sites, 1);
    assert_eq!(stats.diagnostics, 1);
}

#[test]
fn throw_caught_by_exact_type_is_silent() {
    let cb = codebase();
    let body = vec![Node::try_catch(
        2,
        vec![Node::throw_new("Exc", 3)],
        vec![catch(&["Exc"], 4)],
        None,
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn throw_caught_by_ancestor_is_silent() {
    let cb = codebase();
    let body = vec![Node::try_catch(
        2,
        vec![Node::throw_new("NotFoundException", 3)],
        vec![catch(&["LogicException"], 4), catch(&["Exception"], 5)],
        None,
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn catch_of_descendant_does_not_protect() {
    let cb = codebase();
    let body = vec![Node::try_catch(
        2,
        vec![Node::throw_new("RuntimeException", 3)],
        vec![catch(&["NotFoundException"], 4)],
        None,
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].thrown_type, "RuntimeException");
}

#[test]
fn multi_type_catch_clause_catches_each_listed_type() {
    let mut cb = codebase();
    cb.bind_variable("f", "$e", "LogicException|NotFoundException");
    let body = vec![Node::try_catch(
        2,
        vec![Node::throw(Expr::Variable("e".to_string()), 3)],
        vec![catch(&["LogicException", "RuntimeException"], 4)],
        None,
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn declared_ancestor_covers_thrown_type() {
    let mut cb = codebase();
    cb.function("f", Some("RuntimeException"));
    let (diags, _) = check(
        &cb,
        &throws_only(),
        vec![Node::function("f", 1, vec![Node::throw_new("NotFoundException", 2)])],
    );
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn uncovered_type_is_a_mismatch_naming_the_contract() {
    let mut cb = codebase();
    cb.function("f", Some("LogicException|\\NotFoundException"));
    let (diags, _) = check(
        &cb,
        &throws_only(),
        vec![Node::function("f", 1, vec![Node::throw_new("RuntimeException", 2)])],
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeMismatch);
    assert_eq!(
        diags[0].declared.as_deref(),
        Some("LogicException|NotFoundException")
    );
    assert_eq!(
        diags[0].message(),
        "f() throws RuntimeException, but it only has declarations of '@throws LogicException|NotFoundException'"
    );
}

#[test]
fn declared_to_throw_nothing_is_a_mismatch_not_absent() {
    let mut cb = codebase();
    cb.function("f", Some(""));
    let (diags, _) = check(
        &cb,
        &throws_only(),
        vec![Node::function("f", 1, vec![Node::throw_new("Exc", 2)])],
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeMismatch);
    assert_eq!(diags[0].declared.as_deref(), Some(""));
}

#[test]
fn each_escaping_type_gets_its_own_diagnostic() {
    let mut cb = codebase();
    cb.bind_variable("f", "e", "LogicException|RuntimeException|NotFoundException");
    let body = vec![Node::try_catch(
        2,
        vec![Node::throw(Expr::Variable("e".to_string()), 3)],
        vec![catch(&["NotFoundException"], 4)],
        None,
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    let thrown: Vec<_> = diags.iter().map(|d| d.thrown_type.as_str()).collect();
    assert_eq!(thrown, vec!["LogicException", "RuntimeException"]);
}

#[test]
fn unknown_thrown_type_abstains() {
    let cb = codebase();
    let (diags, stats) = check(
        &cb,
        &throws_only(),
        vec![Node::function("f", 1, vec![Node::throw(Expr::Unknown, 2)])],
    );
    assert!(diags.is_empty());
    assert_eq!(stats.unknown_types, 1);
    assert_eq!(stats.throw_sites, 1);
}

#[test]
fn top_level_throw_is_not_checked() {
    let cb = codebase();
    let (diags, stats) = check(&cb, &throws_only(), vec![Node::throw_new("Exc", 1)]);
    assert!(diags.is_empty());
    assert_eq!(stats.throw_sites, 0);
}

#[test]
fn methods_are_named_with_their_class() {
    let mut cb = codebase();
    cb.method("Repo", "load", Some("LogicException"));
    let (diags, _) = check(
        &cb,
        &throws_only(),
        vec![Node::method("Repo", "load", 1, vec![Node::throw_new("Exc", 2)])],
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].function, "Repo::load");
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeMismatch);
}

// ═══════════════════════════════════════════════════════════════════
// Scoping of handlers
// ═══════════════════════════════════════════════════════════════════

#[test]
fn rethrow_in_catch_body_is_covered_by_its_own_clause() {
    let mut cb = codebase();
    cb.bind_variable("f", "$e", "Exc");
    let rethrow = CatchClause::new(
        &["Exc"],
        3,
        vec![Node::throw(Expr::Variable("$e".to_string()), 4)],
    );
    let body = vec![Node::try_catch(2, vec![], vec![rethrow], None)];
    let (diags, stats) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
    assert_eq!(stats.throw_sites, 1);
}

#[test]
fn catch_body_throw_outside_its_own_clauses_is_reported() {
    let cb = codebase();
    let handler = CatchClause::new(&["Exc"], 4, vec![Node::throw_new("LogicException", 5)]);
    let body = vec![Node::try_catch(2, vec![Node::throw_new("Exc", 3)], vec![handler], None)];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].thrown_type, "LogicException");
    assert_eq!(diags[0].line, 5);
}

#[test]
fn throw_in_catch_body_is_protected_by_outer_try() {
    let cb = codebase();
    let rethrow = CatchClause::new(&["Exc"], 4, vec![Node::throw_new("LogicException", 5)]);
    let inner = Node::try_catch(3, vec![], vec![rethrow], None);
    let outer = Node::try_catch(2, vec![inner], vec![catch(&["Exception"], 7)], None);
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, vec![outer])]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn throw_in_finally_is_covered_by_its_own_try() {
    let cb = codebase();
    let body = vec![Node::try_catch(
        2,
        vec![],
        vec![catch(&["Exc"], 3)],
        Some(vec![Node::throw_new("Exc", 5)]),
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn throw_in_finally_outside_its_own_clauses_is_reported() {
    let cb = codebase();
    let body = vec![Node::try_catch(
        2,
        vec![],
        vec![catch(&["Exc"], 3)],
        Some(vec![Node::throw_new("LogicException", 5)]),
    )];
    let (diags, _) = check(&cb, &throws_only(), vec![Node::function("f", 1, body)]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 5);
}

#[test]
fn closures_are_analyzed_against_their_own_contract() {
    let mut cb = codebase();
    cb.function("outer", Some("Exc"));
    let closure = Node::closure("{closure}", 3, vec![Node::throw_new("Exc", 4)]);
    let body = vec![Node::try_catch(2, vec![closure], vec![catch(&["Exc"], 6)], None)];
    let (diags, stats) = check(&cb, &throws_only(), vec![Node::function("outer", 1, body)]);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].function, "{closure}");
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeAbsent);
    assert_eq!(stats.functions_visited, 2);
}

// ═══════════════════════════════════════════════════════════════════
// Call sites
// ═══════════════════════════════════════════════════════════════════

fn caller_calling_g() -> (Codebase, Vec<Node>) {
    let mut cb = codebase();
    cb.class("A", &["Exception"])
        .class("B", &["Exception"])
        .function("f", Some("A"))
        .function("g", Some("A|B"));
    let items = vec![Node::function("f", 1, vec![Node::call_named("g", 2)])];
    (cb, items)
}

#[test]
fn callee_contract_outside_caller_contract_is_mismatch_for_call() {
    let (cb, items) = caller_calling_g();
    let (diags, stats) = check(&cb, &with_calls(), items);

    assert_eq!(diags.len(), 1);
    let d = &diags[0];
    assert_eq!(d.kind, DiagnosticKind::ThrowTypeMismatchForCall);
    assert_eq!(d.thrown_type, "B");
    assert_eq!(d.invoked.as_deref(), Some("g"));
    assert_eq!(d.declared.as_deref(), Some("A"));
    assert_eq!(
        d.message(),
        "f() throws B because it calls g(), but it only has declarations of '@throws A'"
    );
    assert_eq!(stats.call_sites, 1);
}

#[test]
fn call_sites_are_ignored_when_invoked_callables_are_off() {
    let (cb, items) = caller_calling_g();
    let (diags, stats) = check(&cb, &throws_only(), items);
    assert!(diags.is_empty());
    assert_eq!(stats.call_sites, 0);
}

#[test]
fn undeclared_caller_gets_absent_for_call() {
    let mut cb = codebase();
    cb.function("g", Some("LogicException"));
    let items = vec![Node::function("f", 1, vec![Node::call_named("g", 2)])];
    let (diags, _) = check(&cb, &with_calls(), items);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeAbsentForCall);
    assert_eq!(
        diags[0].message(),
        "f() can throw LogicException because it calls g(), but has no '@throws' declarations for that class"
    );
}

#[test]
fn undeclared_callee_contributes_nothing() {
    let mut cb = codebase();
    cb.function("g", None);
    let items = vec![Node::function("f", 1, vec![Node::call_named("g", 2)])];
    let (diags, _) = check(&cb, &with_calls(), items);
    assert!(diags.is_empty());
}

#[test]
fn callee_types_caught_locally_are_removed() {
    let (cb, _) = caller_calling_g();
    let body = vec![Node::try_catch(
        2,
        vec![Node::call_named("g", 3)],
        vec![catch(&["B"], 4)],
        None,
    )];
    let (diags, _) = check(&cb, &with_calls(), vec![Node::function("f", 1, body)]);
    assert!(diags.is_empty(), "got {diags:?}");
}

#[test]
fn unknown_function_abstains_as_not_found() {
    let cb = codebase();
    let items = vec![Node::function("f", 1, vec![Node::call_named("missing", 2)])];
    let (diags, stats) = check(&cb, &with_calls(), items);
    assert!(diags.is_empty());
    assert_eq!(stats.abstentions_for(AbstainReason::NotFound), 1);
}

#[test]
fn every_resolved_candidate_is_checked() {
    let mut cb = codebase();
    cb.function("one", Some("LogicException"))
        .function("two", Some("RuntimeException"))
        .bind_callable("f", "handler", &["one", "two"]);
    let call = Node::call(Expr::Variable("handler".to_string()), 2, vec![]);
    let (diags, _) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    let invoked: Vec<_> = diags.iter().filter_map(|d| d.invoked.as_deref()).collect();
    assert_eq!(invoked, vec!["one", "two"]);
}

#[test]
fn nested_call_arguments_are_reported_first() {
    let mut cb = codebase();
    cb.function("inner", Some("LogicException"))
        .function("outer", Some("RuntimeException"));
    let call = Node::call(
        Expr::Name("outer".to_string()),
        2,
        vec![Node::call_named("inner", 3)],
    );
    let (diags, _) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    let invoked: Vec<_> = diags.iter().filter_map(|d| d.invoked.as_deref()).collect();
    assert_eq!(invoked, vec!["inner", "outer"]);
}

#[test]
fn method_call_on_unresolvable_receiver_is_silent() {
    let cb = codebase();
    let call = Node::method_call(Expr::Unknown, MethodName::Literal("save".to_string()), 2, vec![]);
    let (diags, stats) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    assert!(diags.is_empty());
    assert_eq!(stats.abstentions_for(AbstainReason::Unresolvable), 1);
}

#[test]
fn method_call_resolves_through_receiver_type() {
    let mut cb = codebase();
    cb.class("Repo", &[])
        .method("Repo", "save", Some("RuntimeException"))
        .function("f", Some("LogicException"))
        .bind_variable("f", "repo", "Repo");
    let call = Node::method_call(
        Expr::Variable("repo".to_string()),
        MethodName::Literal("save".to_string()),
        2,
        vec![],
    );
    let (diags, _) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].invoked.as_deref(), Some("Repo::save"));
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeMismatchForCall);
}

#[test]
fn dynamic_method_name_uses_constant_string_or_abstains() {
    let mut cb = codebase();
    cb.method("Repo", "save", Some("RuntimeException"))
        .bind_variable("f", "repo", "Repo");
    let receiver = Expr::Variable("repo".to_string());
    let literal = Node::method_call(
        receiver.clone(),
        MethodName::Dynamic(Expr::StringLiteral("save".to_string())),
        2,
        vec![],
    );
    let dynamic = Node::method_call(
        receiver,
        MethodName::Dynamic(Expr::Variable("name".to_string())),
        3,
        vec![],
    );
    let (diags, stats) = check(
        &cb,
        &with_calls(),
        vec![Node::function("f", 1, vec![literal, dynamic])],
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 2);
    assert_eq!(stats.abstentions_for(AbstainReason::Unresolvable), 1);
}

#[test]
fn missing_method_is_deferred_to_other_pass() {
    let mut cb = codebase();
    cb.class("Repo", &[]).bind_variable("f", "repo", "Repo");
    let call = Node::method_call(
        Expr::Variable("repo".to_string()),
        MethodName::Literal("nope".to_string()),
        2,
        vec![],
    );
    let (diags, stats) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    assert!(diags.is_empty());
    assert_eq!(stats.abstentions_for(AbstainReason::DeferredToOtherPass), 1);
}

#[test]
fn static_call_is_resolved_forgivingly() {
    let mut cb = codebase();
    cb.class("Factory", &[])
        .class("Child", &["Factory"])
        .static_method("Factory", "make", Some("LogicException"));
    let call = Node::static_call("\\Child", "make", 2, vec![]);
    let (diags, _) = check(&cb, &with_calls(), vec![Node::function("f", 1, vec![call])]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].invoked.as_deref(), Some("Factory::make"));
    assert_eq!(diags[0].kind, DiagnosticKind::ThrowTypeAbsentForCall);
}

// ═══════════════════════════════════════════════════════════════════
// Ignore list
// ═══════════════════════════════════════════════════════════════════

#[test]
fn ignored_type_and_descendants_are_suppressed_until_reload() {
    let cb = codebase();
    let items = vec![Node::function(
        "f",
        1,
        vec![
            Node::throw_new("RuntimeException", 2),
            Node::throw_new("NotFoundException", 3),
            Node::throw_new("LogicException", 4),
        ],
    )];
    let file = SourceFile::new("src/app.php", items);

    let mut session = AnalysisSession::new(
        &AnalysisConfig {
            ignored_exception_types: vec!["RuntimeException".to_string()],
            ..Default::default()
        },
        &cb,
        &cb,
    );

    let mut diags = Vec::new();
    session.checker().check_file(&file, &mut diags);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].thrown_type, "LogicException");
    assert!(session.ignore_list().is_initialized());

    session.reset();
    assert!(!session.ignore_list().is_initialized());
    let mut diags = Vec::new();
    session.checker().check_file(&file, &mut diags);
    assert_eq!(diags.len(), 1);

    session.reload(&AnalysisConfig::default());
    let mut diags = Vec::new();
    session.checker().check_file(&file, &mut diags);
    assert_eq!(diags.len(), 3);
}

#[test]
fn ignore_list_follows_each_sessions_own_codebase() {
    let mut first = Codebase::new();
    first
        .class("Exception", &[])
        .class("RuntimeException", &["Exception"])
        .class("LogicException", &["Exception"]);
    let mut second = Codebase::new();
    second
        .class("Exception", &[])
        .class("LogicException", &["Exception"])
        .class("RuntimeException", &["Exception"]);
    let config = AnalysisConfig {
        ignored_exception_types: vec!["RuntimeException".to_string()],
        ..Default::default()
    };
    let file = SourceFile::new(
        "src/app.php",
        vec![Node::function(
            "f",
            1,
            vec![
                Node::throw_new("RuntimeException", 2),
                Node::throw_new("LogicException", 3),
            ],
        )],
    );

    for cb in [&first, &second] {
        let session = AnalysisSession::new(&config, cb, cb);
        let mut diags = Vec::new();
        session.checker().check_file(&file, &mut diags);
        assert_eq!(diags.len(), 1, "got {diags:?}");
        assert_eq!(diags[0].thrown_type, "LogicException");
        assert_eq!(session.ignored_types(), &cb.parse("RuntimeException"));
    }
}

#[test]
fn ignore_list_applies_to_call_sites_too() {
    let (cb, items) = caller_calling_g();
    let config = AnalysisConfig {
        check_invoked_callables: Some(true),
        ignored_exception_types: vec!["B".to_string()],
    };
    let (diags, _) = check(&cb, &config, items);
    assert!(diags.is_empty(), "got {diags:?}");
}
