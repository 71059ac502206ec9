/// Telegram HTML escaping for interpolated values
pub mod html;
/// Fabricated node/slot/key identifier generation
pub mod ids;
/// Consistent-format tracing helpers
pub mod logging;
