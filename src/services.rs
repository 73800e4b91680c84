//! Service names for well-known TCP ports.
//!
//! A static table covers the common services. On systems that ship an
//! `/etc/services` database its TCP entries are layered on top, mirroring
//! what `getservbyport(port, "tcp")` would answer.

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default location of the system services database.
pub const SYSTEM_SERVICES_FILE: &str = "/etc/services";

/// Static map of well-known TCP ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Common TCP services
    m.insert(20, "ftp-data");
    m.insert(21, "ftp");
    m.insert(22, "ssh");
    m.insert(23, "telnet");
    m.insert(25, "smtp");
    m.insert(53, "domain");
    m.insert(80, "http");
    m.insert(88, "kerberos");
    m.insert(110, "pop3");
    m.insert(111, "rpcbind");
    m.insert(119, "nntp");
    m.insert(135, "msrpc");
    m.insert(139, "netbios-ssn");
    m.insert(143, "imap");
    m.insert(179, "bgp");
    m.insert(194, "irc");
    m.insert(389, "ldap");
    m.insert(443, "https");
    m.insert(445, "microsoft-ds");
    m.insert(464, "kpasswd");
    m.insert(465, "smtps");
    m.insert(513, "rlogin");
    m.insert(514, "syslog");
    m.insert(515, "printer");
    m.insert(523, "ibm-db2");
    m.insert(543, "klogin");
    m.insert(544, "kshell");
    m.insert(548, "afp");
    m.insert(554, "rtsp");
    m.insert(587, "submission");
    m.insert(631, "ipp");
    m.insert(636, "ldaps");
    m.insert(873, "rsync");
    m.insert(902, "vmware-auth");
    m.insert(993, "imaps");
    m.insert(995, "pop3s");
    m.insert(1080, "socks");
    m.insert(1194, "openvpn");
    m.insert(1433, "mssql");
    m.insert(1434, "mssql-m");
    m.insert(1521, "oracle");
    m.insert(1723, "pptp");
    m.insert(1883, "mqtt");
    m.insert(2049, "nfs");
    m.insert(2082, "cpanel");
    m.insert(2083, "cpanel-ssl");
    m.insert(2086, "whm");
    m.insert(2087, "whm-ssl");
    m.insert(2181, "zookeeper");
    m.insert(2375, "docker");
    m.insert(2376, "docker-ssl");
    m.insert(3000, "hbci");
    m.insert(3128, "squid");
    m.insert(3268, "globalcat");
    m.insert(3269, "globalcat-ssl");
    m.insert(3306, "mysql");
    m.insert(3389, "rdp");
    m.insert(3690, "svn");
    m.insert(4369, "epmd");
    m.insert(4443, "pharos");
    m.insert(5000, "upnp");
    m.insert(5060, "sip");
    m.insert(5061, "sips");
    m.insert(5222, "xmpp-client");
    m.insert(5269, "xmpp-server");
    m.insert(5432, "postgresql");
    m.insert(5672, "amqp");
    m.insert(5900, "vnc");
    m.insert(5984, "couchdb");
    m.insert(6379, "redis");
    m.insert(6443, "kubernetes-api");
    m.insert(6666, "ircu");
    m.insert(6667, "ircd");
    m.insert(7001, "weblogic");
    m.insert(7077, "spark-master");
    m.insert(8000, "http-alt");
    m.insert(8008, "http-alt");
    m.insert(8080, "http-proxy");
    m.insert(8081, "http-alt");
    m.insert(8082, "http-alt");
    m.insert(8083, "http-alt");
    m.insert(8443, "https-alt");
    m.insert(8888, "http-alt");
    m.insert(9000, "cslistener");
    m.insert(9042, "cassandra");
    m.insert(9090, "prometheus");
    m.insert(9092, "kafka");
    m.insert(9200, "elasticsearch");
    m.insert(9300, "elasticsearch-cluster");
    m.insert(9418, "git");
    m.insert(10000, "webmin");
    m.insert(11211, "memcached");
    m.insert(15672, "rabbitmq-mgmt");
    m.insert(27017, "mongodb");
    m.insert(27018, "mongodb");
    m.insert(27019, "mongodb");
    m.insert(28017, "mongodb-web");
    m.insert(50000, "db2");
    m.insert(50070, "hdfs-namenode");
    m.insert(50075, "hdfs-datanode");

    m
});

/// Port to service-name lookup table.
#[derive(Debug, Clone, Default)]
pub struct ServiceTable {
    overlay: HashMap<u16, String>,
}

impl ServiceTable {
    /// A table backed only by the static well-known list.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load TCP entries from a file in `/etc/services` format, layered over
    /// the static list.
    pub fn from_services_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let overlay = parse_services(&content);
        debug!(path = %path.display(), entries = overlay.len(), "loaded services database");
        Ok(Self { overlay })
    }

    /// Use the system services database when readable, the static list otherwise.
    ///
    /// Many systems ship no services database, so a missing file is only
    /// logged at debug level.
    pub fn system() -> Self {
        Self::system_from(SYSTEM_SERVICES_FILE)
    }

    fn system_from(path: impl AsRef<Path>) -> Self {
        match Self::from_services_file(path) {
            Ok(table) => table,
            Err(e) => {
                debug!(error = %e, "no system services database, using builtin table");
                Self::builtin()
            }
        }
    }

    /// Load a configured `path`, warning and falling back to the static list
    /// on failure.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> Self {
        match Self::from_services_file(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "falling back to builtin service table");
                Self::builtin()
            }
        }
    }

    /// Look up the probable service name for a TCP port.
    ///
    /// Returns `None` if the port is not known.
    pub fn lookup(&self, port: u16) -> Option<&str> {
        self.overlay
            .get(&port)
            .map(String::as_str)
            .or_else(|| builtin_service_name(port))
    }
}

/// Look up a port in the static table only.
pub fn builtin_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Parse `/etc/services` content, keeping the first TCP name seen per port.
fn parse_services(content: &str) -> HashMap<u16, String> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();
        let (Some(name), Some(port_proto)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((port, proto)) = port_proto.split_once('/') else {
            continue;
        };
        if !proto.eq_ignore_ascii_case("tcp") {
            continue;
        }
        if let Ok(port) = port.parse::<u16>() {
            map.entry(port).or_insert_with(|| name.to_string());
        }
    }

    map
}
