/// Free-text reply capture and admin forwarding
pub mod replies;
/// Timed message sequencing over a delivery channel
pub mod sequencer;
