/// A monitored `(ip, port)` endpoint and its last observed reachability.
///
/// `ip` is kept as stored text; it is only validated on the query path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub id: i64,
    pub ip: String,
    pub port: u16,
    pub available: bool,
}

impl ServiceTarget {
    /// Decode a `SELECT id, ip, port, available` row.
    ///
    /// Returns `Ok(None)` when the stored port is outside `0..=65535`.
    pub(crate) fn from_row(row: &libsql::Row) -> Result<Option<Self>, libsql::Error> {
        let id: i64 = row.get(0)?;
        let ip: String = row.get(1)?;
        let raw_port: i64 = row.get(2)?;
        let available = row.get::<i64>(3)? != 0;

        let Ok(port) = u16::try_from(raw_port) else {
            tracing::warn!(id, ip = %ip, port = raw_port, "Skipping target with out-of-range port");
            return Ok(None);
        };

        Ok(Some(Self { id, ip, port, available }))
    }
}
