/* 📖 # Why use a separate file for these error tests?

These tests pin down the Debug rendering, which is what ends up on stderr when the CLI fails.
Span trace output contains line numbers, so the tests that enter spans live apart from
the main error module.
*/

#[cfg(test)]
mod tests {
    use crate::{GreeterError, GreeterResult, ResultExt};
    use expect_test::expect;
    use tracing::{span, warn_span};
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;

    // 📖 # Why a scoped subscriber?
    // SpanTrace::capture() only records spans when the current dispatcher has an ErrorLayer.
    // `with_default` scopes the subscriber to the test thread, so tests that expect no
    // trace are unaffected when they run concurrently.
    fn with_error_layer<T>(f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(ErrorLayer::default());
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn test_debug_message_only() {
        let error = GreeterError::message("something went wrong");

        expect![[r#"
            something went wrong

        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_debug_pretty_print_format() {
        let error = GreeterError::allocation_failure(12, None)
            .context("formatting greeting")
            .context("while running greeter");

        expect![[r#"
            Allocation of 12 bytes failed
            ├─ formatting greeting
            └─ while running greeter

        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_debug_nested_errors() {
        let inner_error = GreeterError::message("inner error").context("inner context");

        let outer_error = GreeterError::invalid_input("name is not valid UTF-8")
            .context("outer context")
            .caused_by(inner_error);

        expect![[r#"
            Invalid input: name is not valid UTF-8
            ├─ outer context
            └─ cause: inner error
               └─ inner context

        "#]]
        .assert_debug_eq(&outer_error);
    }

    #[test]
    fn test_debug_multiple_nested_errors() {
        let error_1 = GreeterError::message("error 1").context("context 1");
        let error_2 = GreeterError::message("error 2")
            .context("context 2")
            .caused_by(error_1);
        let error_3 = GreeterError::message("error 3")
            .context("context 3")
            .caused_by(error_2);

        expect![[r#"
            error 3
            ├─ context 3
            └─ cause: error 2
               ├─ context 2
               └─ cause: error 1
                  └─ context 1

        "#]]
        .assert_debug_eq(&error_3);
    }

    #[test]
    fn test_debug_cause_without_context() {
        let error = GreeterError::message("outer").caused_by(GreeterError::message("inner"));

        expect![[r#"
            outer
            └─ cause: inner

        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_spantrace_display_includes_span_information() {
        let error = with_error_layer(|| {
            let operation_span = span!(tracing::Level::DEBUG, "greet_operation", attempt = 42);
            let _guard = operation_span.enter();
            GreeterError::message("test error message")
        });

        let debug = format!("{:?}", error);
        assert!(debug.starts_with("test error message\nTrace: "));
        assert!(debug.contains("greet_operation"));
        assert!(debug.contains("attempt=42"));
    }

    #[test]
    fn test_spantrace_lists_innermost_span_first() {
        let error = with_error_layer(|| {
            let operation_span = span!(tracing::Level::DEBUG, "operation");
            let _guard = operation_span.enter();
            let outer_span = warn_span!("outer span");
            let _outer_guard = outer_span.enter();
            GreeterError::message("error").context("context")
        });

        let debug = format!("{:?}", error);
        let outer = debug.find("outer span").expect("outer span in trace");
        let operation = debug.find("::operation").expect("operation span in trace");
        assert!(outer < operation);
        assert_eq!(error.get_context(), ["context".to_string()]);
    }

    #[test]
    fn test_no_trace_without_error_layer() {
        let error = GreeterError::message("plain");
        assert!(!format!("{:?}", error).contains("Trace:"));
    }

    #[test]
    fn test_context_survives_result_propagation() {
        fn inner() -> GreeterResult<()> {
            Err(crate::err!("inner failure"))
        }
        fn outer() -> GreeterResult<()> {
            inner().context("calling inner")
        }

        let error = outer().unwrap_err();
        assert_eq!(error.to_string(), "calling inner: inner failure");
        assert_eq!(error.get_context(), ["calling inner".to_string()]);
    }
}
