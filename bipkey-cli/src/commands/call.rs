//! Raw bridge invocation.
//!
//! Prints `{"result": ...}` on success. On failure prints `{"error": <code>}`
//! and exits with status 2 so scripts can tell bridge errors from usage errors.

use bipkey::{Bridge, ErrorCode, Method};
use clap::Args;
use serde_json::{Value, json};

/// Invoke a bridge method.
#[derive(Args)]
pub struct CallCommand {
    /// Method name, e.g. generateRandomMnemonic or decryptedByMnemonic.
    method: String,

    /// Positional arguments as a JSON array, e.g. '[128]'.
    #[arg(default_value = "[]")]
    args: String,

    /// Pretty-print the response.
    #[arg(long)]
    pretty: bool,
}

impl CallCommand {
    /// Execute the call command.
    pub fn execute(self, bridge: &Bridge) -> Result<(), Box<dyn std::error::Error>> {
        let response = match dispatch(bridge, &self.method, &self.args) {
            Ok(result) => json!({ "result": result }),
            Err(code) => {
                print_response(&json!({ "error": code.code() }), self.pretty)?;
                std::process::exit(2);
            }
        };
        print_response(&response, self.pretty)
    }
}

fn dispatch(bridge: &Bridge, method: &str, args: &str) -> Result<Value, ErrorCode> {
    let method: Method = method.parse().inspect_err(|_| {
        tracing::warn!(method, "unknown method; expected one of {}", method_names());
    })?;
    let args: Vec<Value> = serde_json::from_str(args).map_err(|e| {
        tracing::warn!(error = %e, "arguments must be a JSON array");
        ErrorCode::InvalidArgs
    })?;
    if args.len() < method.arity() {
        tracing::warn!(%method, expected = method.arity(), got = args.len(), "too few arguments");
    }
    bridge.handle(method, &args).map(|payload| payload.to_json())
}

fn method_names() -> String {
    Method::ALL.map(Method::name).join(", ")
}

fn print_response(response: &Value, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn dispatches_by_name() {
        let bridge = Bridge::default();
        let args = json!([TEST_MNEMONIC]).to_string();
        assert_eq!(dispatch(&bridge, "isValidMnemonic", &args), Ok(json!(true)));
    }

    #[test]
    fn reports_error_codes() {
        let bridge = Bridge::default();
        assert_eq!(dispatch(&bridge, "nope", "[]"), Err(ErrorCode::InvalidArgs));
        assert_eq!(dispatch(&bridge, "isValidMnemonic", "not json"), Err(ErrorCode::InvalidArgs));
        assert_eq!(dispatch(&bridge, "isValidMnemonic", "{}"), Err(ErrorCode::InvalidArgs));
        assert_eq!(
            dispatch(&bridge, "decryptedByMnemonic", &json!(["bad words", "m/0"]).to_string()),
            Err(ErrorCode::InvalidMnemonic)
        );
        assert_eq!(
            dispatch(&bridge, "publicToAddress", r#"["zz"]"#),
            Err(ErrorCode::InvalidPublicKey)
        );
    }

    #[test]
    fn lists_all_methods() {
        let names = method_names();
        for method in Method::ALL {
            assert!(names.contains(method.name()));
        }
    }
}
