//! Human-readable valid-range text for validator-rejection suggestions
//! (spec §4.3).

pub fn valid_range_hint(param_name: &str) -> &'static str {
    match param_name {
        "distance" | "height" => "between 20 and 1000 centimeters",
        "angle" => "between 0 and 360 degrees",
        "confidence_threshold" => "between 0 and 1",
        "direction" => {
            "one of up, down, left, right, forward, back, clockwise, counterclockwise"
        }
        "quality" => "one of lowest, low, medium, high, highest",
        _ => "a non-empty value",
    }
}
