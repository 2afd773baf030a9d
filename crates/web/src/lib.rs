use rxbind_core::{MAX_PHRASE_LEN, Uid, UidMode};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse_mode(mode: &str) -> Result<UidMode, String> {
    UidMode::from_name(mode).ok_or_else(|| format!("unknown uid mode '{mode}'"))
}

fn to_js(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn derive(phrase: &str, mode: &str) -> Result<Uid, String> {
    rxbind_core::derive_uid(phrase, parse_mode(mode)?).map_err(|err| err.to_string())
}

/// Derive a UID; `mode` is "numeric", "hashed" or "auto"
#[wasm_bindgen]
pub fn derive_uid(phrase: &str, mode: &str) -> Result<Vec<u8>, JsValue> {
    let uid = derive(phrase, mode).map_err(to_js)?;
    Ok(uid.as_bytes().to_vec())
}

/// Same as `derive_uid`, rendered as 12 lowercase hex digits
#[wasm_bindgen]
pub fn derive_uid_hex(phrase: &str, mode: &str) -> Result<String, JsValue> {
    let uid = derive(phrase, mode).map_err(to_js)?;
    Ok(hex::encode(uid))
}

/// Parse a "1,2,3,4" style phrase
#[wasm_bindgen]
pub fn parse_numeric_uid(phrase: &str) -> Result<Vec<u8>, JsValue> {
    let uid = rxbind_core::parse_numeric_uid(phrase).map_err(to_js)?;
    Ok(uid.as_bytes().to_vec())
}

/// Hex MD5 of raw bytes
#[wasm_bindgen]
pub fn md5_hex(input: &[u8]) -> Result<String, JsValue> {
    rxbind_core::md5_hex(input).map_err(to_js)
}

/// Longest phrase accepted by the hashed path
#[wasm_bindgen]
pub fn max_phrase_len() -> usize {
    MAX_PHRASE_LEN
}

/// JSON form of a [`Binding`]
#[derive(Debug, Serialize)]
struct BindingReport {
    mode: UidMode,
    numeric: bool,
    uid: String,
    /// String the hashed path digested, `None` for byte-list phrases
    wrapped: Option<String>,
}

/// A derived binding, kept around so the page can show how it was produced
#[wasm_bindgen]
pub struct Binding {
    phrase: String,
    mode: UidMode,
    uid: Uid,
}

impl Binding {
    fn derive(phrase: &str, mode: &str) -> Result<Binding, String> {
        let mode = parse_mode(mode)?;
        let uid = rxbind_core::derive_uid(phrase, mode).map_err(|err| err.to_string())?;
        Ok(Binding {
            phrase: phrase.to_string(),
            mode,
            uid,
        })
    }

    fn report(&self) -> BindingReport {
        let numeric = self.numeric();
        let wrapped = if numeric {
            None
        } else {
            rxbind_core::wrap_phrase(&self.phrase)
                .ok()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        };

        BindingReport {
            mode: self.mode,
            numeric,
            uid: hex::encode(self.uid),
            wrapped,
        }
    }
}

#[wasm_bindgen]
impl Binding {
    #[wasm_bindgen(constructor)]
    pub fn new(phrase: &str, mode: &str) -> Result<Binding, JsValue> {
        Binding::derive(phrase, mode).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn uid(&self) -> Vec<u8> {
        self.uid.as_bytes().to_vec()
    }

    /// Whether the phrase was read as a byte list rather than hashed
    #[wasm_bindgen(getter)]
    pub fn numeric(&self) -> bool {
        self.mode == UidMode::Numeric
            || (self.mode == UidMode::Auto && rxbind_core::is_numeric_phrase(&self.phrase))
    }

    /// Binding as a JSON string:
    /// `{"mode":"auto","numeric":false,"uid":"4f04fd822155","wrapped":"-DMY_BINDING_PHRASE=\"test\""}`
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.report()).map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn json_of(phrase: &str, mode: &str) -> Value {
        let binding = Binding::derive(phrase, mode).unwrap();
        let text = serde_json::to_string(&binding.report()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_hashed_binding_json() {
        assert_eq!(
            json_of("test", "auto"),
            json!({
                "mode": "auto",
                "numeric": false,
                "uid": "4f04fd822155",
                "wrapped": "-DMY_BINDING_PHRASE=\"test\"",
            })
        );
    }

    #[test]
    fn test_json_escapes_phrase_text() {
        let phrase = "say \"hi\"\\ line1\nline2\ttab\u{1}";
        let value = json_of(phrase, "hashed");

        assert_eq!(value["numeric"], false);
        assert_eq!(
            value["wrapped"],
            format!("-DMY_BINDING_PHRASE=\"{phrase}\"")
        );
        assert_eq!(
            value["uid"],
            hex::encode(rxbind_core::derive_hashed_uid(phrase).unwrap())
        );
    }

    #[test]
    fn test_auto_numeric_binding_has_no_wrapped_string() {
        let binding = Binding::derive("1,2,3,4", "auto").unwrap();
        assert!(binding.numeric());
        assert_eq!(binding.uid(), [0, 0, 1, 2, 3, 4]);

        assert_eq!(
            json_of("1,2,3,4", "auto"),
            json!({
                "mode": "auto",
                "numeric": true,
                "uid": "000001020304",
                "wrapped": null,
            })
        );
    }

    #[test]
    fn test_numeric_flag_follows_mode() {
        assert!(Binding::derive("1,2,3,4", "numeric").unwrap().numeric());
        assert!(!Binding::derive("1,2,3,4", "hashed").unwrap().numeric());
        assert!(!Binding::derive("hello", "auto").unwrap().numeric());
    }

    #[test]
    fn test_mode_errors() {
        assert_eq!(parse_mode("AUTO"), Ok(UidMode::Auto));
        assert_eq!(parse_mode("sha1"), Err("unknown uid mode 'sha1'".to_string()));
        assert!(Binding::derive("test", "sha1").is_err());
    }

    #[test]
    fn test_derive_errors_are_reported() {
        assert_eq!(
            derive("1,2,3", "numeric"),
            Err(rxbind_core::Error::InvalidTokenCount { count: 3 }.to_string())
        );
        assert_eq!(derive("test", "hashed").map(hex::encode), Ok("4f04fd822155".to_string()));
        assert_eq!(max_phrase_len(), MAX_PHRASE_LEN);
    }
}
