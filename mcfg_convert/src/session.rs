//! Conversion session: load → select profile → convert → save.
//!
//! A conversion runs on a copy of the loaded document and is committed only
//! when every step succeeds, so a failed run leaves the session's document
//! exactly as it was loaded.

use std::path::Path;
use std::sync::Arc;

use mcfg_common::document::ParameterDocument;
use mcfg_common::profile::{Profile, ProfileCatalog, ProfileId};
use mcfg_common::status::{Severity, StatusChannel};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::ConvertError;
use crate::report::ConversionReport;

pub struct ConversionSession {
    doc: ParameterDocument,
    profile: Option<&'static Profile>,
    user_status: StatusChannel,
    warnings: Arc<Mutex<Vec<String>>>,
}

impl ConversionSession {
    /// Load `path`, warning if the stored checksum does not match.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        Self::load_with(path, StatusChannel::none(), true)
    }

    /// Load `path` with a status channel attached from the start, so
    /// load-time warnings reach it.
    pub fn load_with(
        path: &Path,
        status: StatusChannel,
        verify_checksum: bool,
    ) -> Result<Self, ConvertError> {
        let doc = ParameterDocument::load(path)?;
        let session = Self::from_document(doc).with_status(status);
        if verify_checksum {
            session.verify_checksum();
        }
        Ok(session)
    }

    /// Wrap an already parsed document.
    pub fn from_document(doc: ParameterDocument) -> Self {
        let mut session = Self {
            doc,
            profile: None,
            user_status: StatusChannel::none(),
            warnings: Arc::default(),
        };
        session.install_status();
        session
    }

    /// Forward recoverable warnings to `status` in addition to the log.
    pub fn with_status(mut self, status: StatusChannel) -> Self {
        self.user_status = status;
        self.install_status();
        self
    }

    fn install_status(&mut self) {
        let log = Arc::clone(&self.warnings);
        let user = self.user_status.callback().cloned();
        self.doc.set_status(StatusChannel::new(move |severity, message, detail| {
            if severity != Severity::Info {
                log.lock().push(format!("{message}: {detail}"));
            }
            if let Some(cb) = &user {
                cb(severity, message, detail);
            }
        }));
    }

    fn verify_checksum(&self) {
        if self.doc.checksum_matches() {
            return;
        }
        let detail = format!(
            "stored {:?}, computed {}",
            self.doc.stored_checksum(),
            self.doc.checksum()
        );
        self.doc.status().warn("checksum mismatch", &detail);
    }

    pub fn select_profile(&mut self, id: ProfileId) {
        let profile = ProfileCatalog::get(id);
        info!(profile = %id, name = profile.display_name, "profile selected");
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&'static Profile> {
        self.profile
    }

    /// Convert the document for the selected profile.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoProfileSelected`] before [`select_profile`], or any
    /// allocation failure. The document is unchanged on error. The report
    /// carries only warnings raised during this call.
    ///
    /// [`select_profile`]: Self::select_profile
    pub fn convert(&mut self) -> Result<ConversionReport, ConvertError> {
        let profile = self.profile.ok_or(ConvertError::NoProfileSelected)?;
        let first_warning = self.warnings.lock().len();
        let mut working = self.doc.clone();
        let mut report = match crate::convert(&mut working, profile) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "conversion failed, document left untouched");
                return Err(e);
            }
        };
        self.doc = working;
        report.warnings = self.warnings.lock()[first_warning..].to_vec();
        Ok(report)
    }

    pub fn recompute_checksum(&mut self) {
        self.doc.recompute_checksum();
    }

    pub fn save(&self, path: &Path) -> Result<(), ConvertError> {
        self.doc.save(path)?;
        info!(path = %path.display(), "converted document written");
        Ok(())
    }

    pub fn document(&self) -> &ParameterDocument {
        &self.doc
    }

    pub fn into_document(self) -> ParameterDocument {
        self.doc
    }

    /// Warnings reported since the session was created.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SOURCE: &str = "Checksum=0\r\n\
        [Machine]\r\n\
        SensorTHCInstalled=1\r\n\
        XAxisOrientation=0\r\n\
        \r\n\
        [I/O]\r\n\
        Input1Type=0\r\n\
        Input47Number=0\r\n";

    fn session() -> ConversionSession {
        ConversionSession::from_document(ParameterDocument::parse(SOURCE).unwrap())
    }

    #[test]
    fn convert_requires_profile() {
        let mut s = session();
        assert!(matches!(s.convert(), Err(ConvertError::NoProfileSelected)));
    }

    #[test]
    fn convert_updates_document() {
        let mut s = session();
        s.select_profile(ProfileId::DiagnosticBoards);
        let report = s.convert().unwrap();
        assert_eq!(report.profile, ProfileId::DiagnosticBoards);
        assert_eq!(report.input_at(1), Some(47));
        assert_eq!(s.document().get_value("[I/O]", "Input1Type="), Some(47));
        assert_eq!(s.document().get_value("[I/O]", "Input47Number="), Some(1));
    }

    #[test]
    fn warnings_reach_callback_and_report() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let doc = ParameterDocument::parse(
            "Checksum=0\r\n[Link]\r\nPort1Type=abc\r\n\r\n[I/O]\r\nInput1Type=0\r\n",
        )
        .unwrap();
        let mut s = ConversionSession::from_document(doc).with_status(StatusChannel::new(
            move |_, _, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            },
        ));
        s.select_profile(ProfileId::Bench);
        let report = s.convert().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("malformed value"));
    }

    #[test]
    fn checksum_mismatch_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.ini");
        std::fs::write(&path, "Checksum=12345\r\n[Machine]\r\n").unwrap();

        let s = ConversionSession::load(&path).unwrap();
        let warnings = s.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("checksum mismatch"));
    }

    #[test]
    fn report_carries_only_this_runs_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.ini");
        std::fs::write(
            &path,
            "Checksum=12345\r\n[Link]\r\nPort1Type=abc\r\n\r\n[I/O]\r\nInput1Type=0\r\n",
        )
        .unwrap();

        let mut s = ConversionSession::load(&path).unwrap();
        assert_eq!(s.warnings().len(), 1);
        s.select_profile(ProfileId::Bench);

        let first = s.convert().unwrap();
        assert_eq!(first.warnings.len(), 1);
        assert!(first.warnings[0].starts_with("malformed value"));

        let second = s.convert().unwrap();
        assert_eq!(second.warnings.len(), 1);
        assert_eq!(s.warnings().len(), 3);
    }

    #[test]
    fn matching_checksum_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.ini");
        let doc = ParameterDocument::parse("Checksum=0\r\n[Machine]\r\nAutoHome=1\r\n").unwrap();
        doc.save(&path).unwrap();

        let s = ConversionSession::load(&path).unwrap();
        assert!(s.warnings().is_empty());
    }
}
