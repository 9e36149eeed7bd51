//! Function host resolution.

/// Fixed service port every deployed function listens on.
pub const FUNCTION_PORT: u16 = 8080;

/// Resolve the network address of a deployed function.
///
/// "local" deployments expose one container per function, named after the
/// namespace and the function; every other deployment kind fronts the
/// function with a service bearing the bare function name. Pure and
/// total; resolution never fails.
pub fn resolve(kind: &str, namespace: &str, function_name: &str) -> String {
    if kind == "local" {
        format!("{}-{}:{}", namespace, function_name, FUNCTION_PORT)
    } else {
        format!("{}:{}", function_name, FUNCTION_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_kind_is_namespace_qualified() {
        assert_eq!(resolve("local", "ns", "f"), "ns-f:8080");
    }

    #[test]
    fn test_other_kinds_use_bare_function_name() {
        assert_eq!(resolve("kube", "ns", "f"), "f:8080");
        assert_eq!(resolve("", "ns", "f"), "f:8080");
    }
}
