//! Parameter converters: raw regex-captured text → typed `ParameterValue`
//! (spec §4.1's unit-conversion rule).

use dronecmd_domain::ParameterValue;

use crate::types::ConversionError;

/// Split a quantity string into its leading numeral and trailing unit,
/// then normalize to centimeters (meters ×100, millimeters ×0.1, bare
/// numbers and centimeters passed through unchanged).
fn parse_quantity_cm(param: &'static str, raw: &str) -> Result<f64, ConversionError> {
    let raw = raw.trim();
    let split_at = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c.is_whitespace()))
        .unwrap_or(raw.len());
    let (num_part, unit_part) = raw.split_at(split_at);
    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| ConversionError::new(param, raw))?;
    let multiplier = match unit_part.trim() {
        "" | "cm" | "センチ" | "センチメートル" => 1.0,
        "m" | "メートル" => 100.0,
        "mm" | "ミリ" | "ミリメートル" => 0.1,
        _ => return Err(ConversionError::new(param, raw)),
    };
    Ok(value * multiplier)
}

pub fn distance_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    parse_quantity_cm("distance", raw).map(ParameterValue::Number)
}

pub fn height_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    parse_quantity_cm("height", raw).map(ParameterValue::Number)
}

pub fn angle_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    raw.trim()
        .parse::<f64>()
        .map(ParameterValue::Number)
        .map_err(|_| ConversionError::new("angle", raw))
}

pub fn confidence_threshold_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    raw.trim()
        .parse::<f64>()
        .map(ParameterValue::Number)
        .map_err(|_| ConversionError::new("confidence_threshold", raw))
}

/// Canonical direction synonyms, English and Japanese, onto the
/// `Direction` enum's string form (spec §4.1).
pub fn direction_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    let canon = match raw.trim() {
        "前" | "前に" | "forward" | "ahead" => "forward",
        "後ろ" | "後ろに" | "後" | "back" | "backward" => "back",
        "上" | "上に" | "up" => "up",
        "下" | "下に" | "down" => "down",
        "左" | "左に" | "left" => "left",
        "右" | "右に" | "right" => "right",
        "時計回り" | "時計回りに" | "clockwise" | "cw" => "clockwise",
        "反時計回り" | "反時計回りに" | "counterclockwise" | "ccw" | "anti-clockwise" => {
            "counterclockwise"
        }
        other => return Err(ConversionError::new("direction", other)),
    };
    Ok(ParameterValue::Text(canon.to_string()))
}

/// Tiered/localized quality synonyms onto `{lowest, low, medium, high, highest}`
/// (spec §4.1).
pub fn quality_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    let canon = match raw.trim() {
        "lowest" | "最低" => "lowest",
        "low" | "basic" | "低" => "low",
        "medium" | "normal" | "普通" | "標準" => "medium",
        "high" | "super" | "高" => "high",
        "highest" | "ultra" | "最高" => "highest",
        other => return Err(ConversionError::new("quality", other)),
    };
    Ok(ParameterValue::Text(canon.to_string()))
}

fn non_empty_text(param: &'static str, raw: &str) -> Result<ParameterValue, ConversionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ConversionError::new(param, raw))
    } else {
        Ok(ParameterValue::Text(trimmed.to_string()))
    }
}

pub fn drone_id_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    non_empty_text("drone_id", raw)
}

pub fn filename_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    non_empty_text("filename", raw)
}

pub fn target_class_converter(raw: &str) -> Result<ParameterValue, ConversionError> {
    non_empty_text("target_class", raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_converter_normalizes_meters_to_cm() {
        let v = distance_converter("2m").unwrap();
        assert_eq!(v.as_number(), Some(200.0));
    }

    #[test]
    fn distance_converter_normalizes_millimeters_to_cm() {
        let v = distance_converter("500mm").unwrap();
        assert_eq!(v.as_number(), Some(50.0));
    }

    #[test]
    fn distance_converter_bare_number_is_centimeters() {
        let v = distance_converter("20").unwrap();
        assert_eq!(v.as_number(), Some(20.0));
    }

    #[test]
    fn distance_converter_rejects_unknown_unit() {
        assert!(distance_converter("20ft").is_err());
    }

    #[test]
    fn direction_converter_maps_japanese_synonyms() {
        assert_eq!(
            direction_converter("前に").unwrap().as_text(),
            Some("forward")
        );
        assert_eq!(
            direction_converter("時計回りに").unwrap().as_text(),
            Some("clockwise")
        );
    }

    #[test]
    fn quality_converter_maps_tiered_synonyms() {
        assert_eq!(quality_converter("basic").unwrap().as_text(), Some("low"));
        assert_eq!(quality_converter("super").unwrap().as_text(), Some("high"));
        assert_eq!(
            quality_converter("ultra").unwrap().as_text(),
            Some("highest")
        );
    }
}
