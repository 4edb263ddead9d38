#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_AAAA: u16 = 28;

pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;

/// How the mock answers a query.
#[derive(Debug, Clone)]
pub enum Reply {
    /// NOERROR with one record per address of the queried family.
    Answer(Vec<IpAddr>),
    /// NOERROR with a CNAME to `target` followed by its addresses.
    Cname { target: String, addrs: Vec<IpAddr> },
    /// No records and the given response code.
    Rcode { rcode: u8, recursion_available: bool },
    /// Well-formed answer carrying a different transaction id.
    WrongId(Vec<IpAddr>),
    /// TC bit with no records over UDP; the full answer over TCP.
    Truncated(Vec<IpAddr>),
    /// Reads the query and never answers.
    Silent,
    /// Bytes that do not decode as a DNS message.
    Garbage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenQuery {
    pub name: String,
    pub qtype: u16,
    pub tcp: bool,
}

struct Script {
    default: Reply,
    rules: HashMap<(String, u16), Reply>,
}

impl Script {
    fn reply_for(&self, name: &str, qtype: u16) -> Reply {
        self.rules
            .get(&(name.to_string(), qtype))
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

/// Answers DNS queries over UDP and TCP on the same loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenQuery>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(default: Reply) -> Self {
        Self::start_with_rules(default, Vec::new()).await
    }

    /// Rules are keyed by lowercase name without the trailing dot, and query type.
    pub async fn start_with_rules(default: Reply, rules: Vec<(&str, u16, Reply)>) -> Self {
        let (udp, tcp) = bind_pair().await;
        let addr = udp.local_addr().unwrap();

        let script = Arc::new(Script {
            default,
            rules: rules
                .into_iter()
                .map(|(name, qtype, reply)| ((name.to_string(), qtype), reply))
                .collect(),
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let udp_script = Arc::clone(&script);
        let udp_seen = Arc::clone(&seen);
        let tcp_script = Arc::clone(&script);
        let tcp_seen = Arc::clone(&seen);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = tcp.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tokio::spawn(serve_tcp(stream, Arc::clone(&tcp_script), Arc::clone(&tcp_seen)));
                        }
                    }
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = respond(&buf[..len], &udp_script, &udp_seen, false) {
                                let _ = udp.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Self {
            addr,
            seen,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn seen(&self) -> Vec<SeenQuery> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_names(&self) -> Vec<String> {
        self.seen().into_iter().map(|q| q.name).collect()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn bind_pair() -> (UdpSocket, TcpListener) {
    for _ in 0..20 {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = udp.local_addr().unwrap().port();
        if let Ok(tcp) = TcpListener::bind(("127.0.0.1", port)).await {
            return (udp, tcp);
        }
    }
    panic!("no loopback port free for both UDP and TCP");
}

async fn serve_tcp(mut stream: TcpStream, script: Arc<Script>, seen: Arc<Mutex<Vec<SeenQuery>>>) {
    loop {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }
        if let Some(response) = respond(&query, &script, &seen, true) {
            let len = (response.len() as u16).to_be_bytes();
            if stream.write_all(&len).await.is_err() || stream.write_all(&response).await.is_err() {
                return;
            }
        }
    }
}

fn respond(
    query: &[u8],
    script: &Script,
    seen: &Mutex<Vec<SeenQuery>>,
    tcp: bool,
) -> Option<Vec<u8>> {
    let (name, qtype, question_end) = parse_question(query)?;
    seen.lock().unwrap().push(SeenQuery {
        name: name.clone(),
        qtype,
        tcp,
    });

    let id = [query[0], query[1]];
    let question = &query[12..question_end];

    match script.reply_for(&name, qtype) {
        Reply::Answer(addrs) => Some(build_response(id, question, 0, true, false, &answer_records(&addrs, qtype))),
        Reply::Cname { target, addrs } => {
            let mut records = vec![cname_record(&target)];
            let owner = encode_name(&target);
            for ip in addrs.iter().filter(|ip| matches_type(ip, qtype)) {
                records.push(address_record(&owner, ip));
            }
            Some(build_response(id, question, 0, true, false, &records))
        }
        Reply::Rcode { rcode, recursion_available } => {
            Some(build_response(id, question, rcode, recursion_available, false, &[]))
        }
        Reply::WrongId(addrs) => {
            let wrong = [id[0] ^ 0xff, id[1] ^ 0xff];
            Some(build_response(wrong, question, 0, true, false, &answer_records(&addrs, qtype)))
        }
        Reply::Truncated(addrs) if tcp => {
            Some(build_response(id, question, 0, true, false, &answer_records(&addrs, qtype)))
        }
        Reply::Truncated(_) => Some(build_response(id, question, 0, true, true, &[])),
        Reply::Silent => None,
        Reply::Garbage => Some(vec![0xde, 0xad]),
    }
}

/// Lowercase question name without the trailing dot, its type, and the end offset of the question.
pub fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    if query.len() < 12 {
        return None;
    }
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((labels.join("."), qtype, pos + 4))
}

fn matches_type(ip: &IpAddr, qtype: u16) -> bool {
    matches!((ip, qtype), (IpAddr::V4(_), TYPE_A) | (IpAddr::V6(_), TYPE_AAAA))
}

fn answer_records(addrs: &[IpAddr], qtype: u16) -> Vec<Vec<u8>> {
    addrs
        .iter()
        .filter(|ip| matches_type(ip, qtype))
        .map(|ip| address_record(&[0xc0, 0x0c], ip))
        .collect()
}

fn address_record(owner: &[u8], ip: &IpAddr) -> Vec<u8> {
    let (rtype, rdata) = match ip {
        IpAddr::V4(v4) => (TYPE_A, v4.octets().to_vec()),
        IpAddr::V6(v6) => (TYPE_AAAA, v6.octets().to_vec()),
    };
    record(owner, rtype, &rdata)
}

fn cname_record(target: &str) -> Vec<u8> {
    record(&[0xc0, 0x0c], TYPE_CNAME, &encode_name(target))
}

fn record(owner: &[u8], rtype: u16, rdata: &[u8]) -> Vec<u8> {
    let mut out = owner.to_vec();
    out.extend_from_slice(&rtype.to_be_bytes());
    out.extend_from_slice(&[0x00, 0x01]);
    out.extend_from_slice(&60u32.to_be_bytes());
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend_from_slice(rdata);
    out
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn build_response(
    id: [u8; 2],
    question: &[u8],
    rcode: u8,
    recursion_available: bool,
    truncated: bool,
    records: &[Vec<u8>],
) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id);
    // QR and RD, plus TC when truncated.
    response.push(if truncated { 0x83 } else { 0x81 });
    let ra = if recursion_available { 0x80 } else { 0x00 };
    response.push(ra | (rcode & 0x0f));
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(question);
    for record in records {
        response.extend_from_slice(record);
    }
    response
}
