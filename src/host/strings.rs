//! Built-in English strings for hosts without their own localization.

/// Status message key for device status 0.
pub const STATUS_SUCCESS: &str = "/Statuses/Success";
/// Status message key for device status 1.
pub const STATUS_NOT_AVAILABLE: &str = "/Statuses/NotAvailable";

const ENGLISH: &[(&str, &str)] = &[
    (
        STATUS_SUCCESS,
        "Success! (Code 0)\nI_OK\n\nEverything's good!",
    ),
    (
        STATUS_NOT_AVAILABLE,
        "Not available! (Code 1)\nE_NOT_AVAILABLE\n\nMake sure the sensor is plugged in, powered and not in use by another application.",
    ),
    ("/Interface/Options/Tracking/Select", "Processing mode:"),
    ("/Interface/Options/Tracking/0", "GPU"),
    ("/Interface/Options/Tracking/1", "CPU"),
    ("/Interface/Options/Tracking/2", "CUDA"),
    ("/Interface/Options/Tracking/3", "TensorRT"),
    ("/Interface/Options/Tracking/4", "DirectML (Default)"),
    ("/Interface/Options/Orientation/Select", "Sensor orientation:"),
    ("/Interface/Options/Orientation/0", "Default"),
    ("/Interface/Options/Orientation/1", "Clockwise 90°"),
    ("/Interface/Options/Orientation/2", "Counter-clockwise 90°"),
    ("/Interface/Options/Orientation/3", "Flipped 180°"),
];

/// Look up the English text for `key`.
pub fn english(key: &str) -> Option<&'static str> {
    ENGLISH
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}
