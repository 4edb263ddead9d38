//! Domain name syntax and the candidate names tried for one lookup.

/// Names at or above this length are rejected before any query is sent.
pub const MAX_NAME_LEN: usize = 256;

const MAX_LABEL_LEN: usize = 63;

/// Reports whether `s` is a syntactically valid domain name (RFC 1035, RFC 3696).
///
/// Labels are letters, digits, `_` and `-`, between 1 and 63 bytes, and may
/// neither start nor end with `-`. At least one character other than a
/// digit or `.` must appear so that dotted numbers are not mistaken for names. A single trailing dot is
/// allowed.
pub fn is_domain_name(s: &str) -> bool {
    if s.is_empty() || s.len() > 255 {
        return false;
    }

    let mut last = b'.';
    let mut non_numeric = false;
    let mut label_len = 0usize;

    for &c in s.as_bytes() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                non_numeric = true;
                label_len += 1;
            }
            b'0'..=b'9' => label_len += 1,
            b'-' => {
                if last == b'.' {
                    return false;
                }
                non_numeric = true;
                label_len += 1;
            }
            b'.' => {
                if last == b'.' || last == b'-' {
                    return false;
                }
                if label_len == 0 || label_len > MAX_LABEL_LEN {
                    return false;
                }
                label_len = 0;
            }
            _ => return false,
        }
        last = c;
    }

    if last == b'-' || label_len > MAX_LABEL_LEN {
        return false;
    }
    non_numeric
}

pub fn is_rooted(name: &str) -> bool {
    name.ends_with('.')
}

pub fn ensure_rooted(name: &str) -> String {
    if is_rooted(name) {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Compares two names ASCII-case-insensitively, ignoring a trailing dot.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

/// Builds the ordered list of fully-qualified names to try for `name`.
///
/// A rooted name is tried alone. Otherwise a name with at least `ndots`
/// dots is tried as-is first, then each search suffix is appended in
/// order, and a name with fewer dots is tried as-is last.
pub fn name_list(name: &str, search: &[String], ndots: usize) -> Vec<String> {
    if is_rooted(name) {
        return vec![name.to_string()];
    }

    let has_ndots = name.bytes().filter(|&b| b == b'.').count() >= ndots;
    let mut names = Vec::with_capacity(search.len() + 1);

    if has_ndots {
        names.push(ensure_rooted(name));
    }
    for suffix in search {
        let suffix = suffix.trim_matches('.');
        if suffix.is_empty() {
            continue;
        }
        names.push(format!("{}.{}.", name, suffix));
    }
    if !has_ndots {
        names.push(ensure_rooted(name));
    }

    names
}
