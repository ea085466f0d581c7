use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Число из строки формы: пустая строка или мусор дают `None`
pub fn safe_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Целое из начала строки, как это делает форма: "3 workers" -> 3
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// "UN1203" -> 1203
pub fn parse_un_number(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("UN").unwrap_or(raw).trim();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Число обратно в строку формы без хвоста ".0"
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Число для полей формы, где ноль означает «не заполнено»
pub fn format_optional_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_number(v),
        _ => String::new(),
    }
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Строка, даже если в JSON пришло число или null
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => safe_number(s),
        _ => None,
    }
}

/// Счётчик, даже если пришёл строкой; мусор даёт 0
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = number_from_value(&Value::deserialize(deserializer)?).unwrap_or(0.0);
    Ok(if count > 0.0 { count as u32 } else { 0 })
}

/// Число или строка с числом; null и мусор дают `None`
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

/// Как `lenient_number`, но отсутствие значения даёт 0
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

/// UN-номер числом или строкой ("1203", "UN1203")
pub fn lenient_un_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => parse_un_number(&s),
        _ => None,
    })
}

/// Значение, которое не удалось разобрать, считается отсутствующим
pub fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// `null` трактуется как значение по умолчанию
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
