//! # Change Channel
//!
//! The license field hands every complete, merged selection to a
//! [`ChangeSink`]. The Form Host on the other end decides whether to keep
//! it; the field never writes the value back to itself.

use std::sync::mpsc::Sender;

use licfield_core::LicenseSelection;

/// Receives "input" notifications from a license field.
pub trait ChangeSink {
    /// Accept the full merged selection produced by an edit.
    fn on_input(&mut self, value: LicenseSelection);
}

/// Discards every change. For read-only hosts such as one-shot validation.
impl ChangeSink for () {
    fn on_input(&mut self, _value: LicenseSelection) {}
}

/// Collects changes in emission order.
impl ChangeSink for Vec<LicenseSelection> {
    fn on_input(&mut self, value: LicenseSelection) {
        self.push(value);
    }
}

/// Forwards changes to another thread or task.
impl ChangeSink for Sender<LicenseSelection> {
    fn on_input(&mut self, value: LicenseSelection) {
        if self.send(value).is_err() {
            tracing::debug!("change receiver dropped; discarding license field input");
        }
    }
}

impl<T: ChangeSink + ?Sized> ChangeSink for &mut T {
    fn on_input(&mut self, value: LicenseSelection) {
        (**self).on_input(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use licfield_core::LicenseId;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<LicenseSelection> = Vec::new();
        sink.on_input(LicenseSelection::with_license(LicenseId(1)));
        sink.on_input(LicenseSelection::with_license(LicenseId(2)));
        let ids: Vec<_> = sink.iter().map(|s| s.license).collect();
        assert_eq!(ids, [Some(LicenseId(1)), Some(LicenseId(2))]);
    }

    #[test]
    fn test_channel_sink_delivers() {
        let (mut tx, rx) = std::sync::mpsc::channel();
        tx.on_input(LicenseSelection::with_license(LicenseId(3)));
        assert_eq!(rx.recv().unwrap().license, Some(LicenseId(3)));
    }

    #[test]
    fn test_channel_sink_tolerates_closed_receiver() {
        let (mut tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        tx.on_input(LicenseSelection::default());
    }

    #[test]
    fn test_borrowed_sink() {
        fn feed<S: ChangeSink>(mut sink: S) {
            sink.on_input(LicenseSelection::default());
        }

        let mut sink: Vec<LicenseSelection> = Vec::new();
        feed(&mut sink);
        feed(&mut sink);
        assert_eq!(sink.len(), 2);
    }
}
