/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the inventory core and the
/// use cases rely on to reach the filesystem, the network and the console.
pub mod environment_probe;
pub mod evidence_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod provenance_reader;
pub mod scan_transport;
pub mod sleeper;

pub use environment_probe::EnvironmentProbe;
pub use evidence_source::EvidenceSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use provenance_reader::{ProvenanceReader, DIRECT_URL_FILE};
pub use scan_transport::{HttpMethod, HttpReply, HttpRequest, ScanTransport};
pub use sleeper::Sleeper;
