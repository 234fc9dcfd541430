use std::time::Duration;

/// Connection settings used when opening an [`MBTilesStore`](crate::MBTilesStore).
///
/// ```rust
/// use mbtiles_container::OpenOptions;
/// use std::time::Duration;
///
/// let options = OpenOptions::default()
///     .max_connections(4)
///     .busy_timeout(Duration::from_millis(250));
/// assert_eq!(options.max_connections, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
	/// Upper bound of pooled SQLite connections.
	pub max_connections: u32,
	/// How long SQLite waits on a locked database before a statement fails.
	pub busy_timeout: Duration,
	/// How long a lookup waits for a free pooled connection.
	pub connection_timeout: Duration,
}

impl OpenOptions {
	#[must_use]
	pub fn max_connections(mut self, max_connections: u32) -> Self {
		self.max_connections = max_connections.max(1);
		self
	}

	#[must_use]
	pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
		self.busy_timeout = busy_timeout;
		self
	}

	#[must_use]
	pub fn connection_timeout(mut self, connection_timeout: Duration) -> Self {
		self.connection_timeout = connection_timeout;
		self
	}
}

impl Default for OpenOptions {
	fn default() -> Self {
		Self {
			max_connections: 10,
			busy_timeout: Duration::from_secs(5),
			connection_timeout: Duration::from_secs(30),
		}
	}
}
