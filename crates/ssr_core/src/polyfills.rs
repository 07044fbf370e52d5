//! Pure polyfill generation for the server render entry.
//!
//! `deno_core` ships a bare V8 isolate. The render entry expects a handful of
//! browser/Node globals, and reads its input from `globalThis.__SSR_CONFIG__`.

use crate::error::{Result, SsrCoreError};

/// Generate the prelude script executed before the render entry.
///
/// This is a pure function - transforms input into output string.
/// The config is double-encoded (a JSON string holding JSON) and handed to
/// `JSON.parse`, so nothing in it is ever evaluated as code.
pub fn generate_polyfills(config_json: &str, node_env: &str) -> Result<String> {
    let config_json_escaped = serde_json::to_string(config_json)
        .map_err(|e| SsrCoreError::Serialization(e.to_string()))?;
    let node_env_escaped = serde_json::to_string(node_env)
        .map_err(|e| SsrCoreError::Serialization(e.to_string()))?;

    Ok(format!(
        r#"
// Render input - injected by the server
globalThis.__SSR_CONFIG__ = JSON.parse({config_json_escaped});

globalThis.process = {{
    env: {{ NODE_ENV: {node_env_escaped} }},
    nextTick: (fn, ...args) => queueMicrotask(() => fn(...args)),
}};

{CONSOLE_POLYFILL}
{PERFORMANCE_POLYFILL}
{MESSAGE_CHANNEL_POLYFILL}
{TEXT_CODEC_POLYFILL}
"#
    ))
}

const CONSOLE_POLYFILL: &str = r#"
// Forward console output to the server log
const __fmt = (args) => args.map((a) => (typeof a === 'object' ? JSON.stringify(a) : String(a))).join(' ');
globalThis.console = {
    log: (...args) => Deno.core.print('[render] ' + __fmt(args) + '\n', false),
    info: (...args) => Deno.core.print('[render] ' + __fmt(args) + '\n', false),
    warn: (...args) => Deno.core.print('[render warn] ' + __fmt(args) + '\n', true),
    error: (...args) => Deno.core.print('[render error] ' + __fmt(args) + '\n', true),
    debug: () => {},
};
"#;

const PERFORMANCE_POLYFILL: &str = r#"
const __perfStart = Date.now();
globalThis.performance = { now: () => Date.now() - __perfStart };
"#;

const MESSAGE_CHANNEL_POLYFILL: &str = r#"
// Scheduler fallback used by UI frameworks when setImmediate is missing
globalThis.MessageChannel = class {
    constructor() {
        const pair = (other) => ({
            onmessage: null,
            postMessage: (data) => queueMicrotask(() => other().onmessage?.({ data })),
        });
        this.port1 = pair(() => this.port2);
        this.port2 = pair(() => this.port1);
    }
};
"#;

const TEXT_CODEC_POLYFILL: &str = r#"
globalThis.TextEncoder = class {
    get encoding() { return 'utf-8'; }
    encode(str = '') {
        const utf8 = unescape(encodeURIComponent(str));
        const out = new Uint8Array(utf8.length);
        for (let i = 0; i < utf8.length; i++) out[i] = utf8.charCodeAt(i);
        return out;
    }
};
globalThis.TextDecoder = class {
    constructor(label = 'utf-8') { this.encoding = label.toLowerCase(); }
    decode(input) {
        if (!input) return '';
        const bytes = input instanceof Uint8Array ? input : new Uint8Array(input);
        let binary = '';
        for (let i = 0; i < bytes.length; i++) binary += String.fromCharCode(bytes[i]);
        return decodeURIComponent(escape(binary));
    }
};
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_polyfills_contains_config() {
        let result = generate_polyfills(r#"{"route":"/"}"#, "production").unwrap();
        assert!(result.contains("globalThis.__SSR_CONFIG__ = JSON.parse("));
        assert!(result.contains(r#"NODE_ENV: "production""#));
    }

    #[test]
    fn test_generate_polyfills_contains_all_polyfills() {
        let result = generate_polyfills("{}", "development").unwrap();
        assert!(result.contains("globalThis.console"));
        assert!(result.contains("globalThis.performance"));
        assert!(result.contains("globalThis.MessageChannel"));
        assert!(result.contains("globalThis.TextEncoder"));
        assert!(result.contains("globalThis.TextDecoder"));
    }

    #[test]
    fn test_config_is_double_encoded() {
        let malicious = r#"{"x":"'); alert('xss'); ('"}"#;
        let result = generate_polyfills(malicious, "production").unwrap();
        // The config only ever appears as a JSON string literal
        assert!(result.contains(r#"JSON.parse("{\"x\":"#));
    }

    #[test]
    fn test_node_env_is_string_literal() {
        let result = generate_polyfills("{}", "\"; alert('xss'); \"").unwrap();
        assert!(result.contains(r#"NODE_ENV: "\"; alert('xss'); \"""#));
    }
}
