//! RGB to CIE 1931 xy conversion

/// Converts an sRGB color to the xy chromaticity the bridge expects.
///
/// Uses the D65 wide gamut matrix from the Hue SDK. Both coordinates are
/// rounded to 3 decimals, half away from zero. Black has no chromaticity and
/// maps to `[0.0, 0.0]`.
#[allow(non_snake_case)]
pub fn rgb_to_xy(red: u8, green: u8, blue: u8) -> [f64; 2] {
	let red = linearize(red);
	let green = linearize(green);
	let blue = linearize(blue);

	let X = red * 0.649926 + green * 0.103455 + blue * 0.197109;
	let Y = red * 0.234327 + green * 0.743075 + blue * 0.022598;
	let Z = red * 0.000000 + green * 0.053077 + blue * 1.035763;

	let sum = X + Y + Z;
	if sum > 0.0 {
		[round3(X / sum), round3(Y / sum)]
	} else {
		[0.0, 0.0]
	}
}

/// Inverse sRGB companding of one 8-bit channel
fn linearize(channel: u8) -> f64 {
	let v = f64::from(channel) / 255.0;
	if v > 0.04045 {
		((v + 0.055) / 1.055).powf(2.4)
	} else {
		v / 12.92
	}
}

fn round3(v: f64) -> f64 {
	(v * 1000.0).round() / 1000.0
}
