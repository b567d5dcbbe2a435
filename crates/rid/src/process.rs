use crate::{checksum::crc32, random_seed};
#[cfg(feature = "tracing")]
use tracing::instrument;

const INIT_CPUSET: &str = "/proc/1/cpuset";

/// Resolves the 16-bit process id embedded in every ID.
///
/// PID 1 is what nearly every container init sees, so it carries no
/// information. In that case the id is taken from the CRC-32 of the init
/// process's cpuset (which names the container's cgroup), or from
/// [`random_seed`] if that is unreadable.
#[cfg_attr(feature = "tracing", instrument(level = "debug"))]
#[must_use]
pub fn resolve_process_id() -> u16 {
    process_id_from(
        std::process::id(),
        || std::fs::read(INIT_CPUSET).ok(),
        || random_seed() as u16,
    )
}

fn process_id_from(
    pid: u32,
    cpuset: impl FnOnce() -> Option<Vec<u8>>,
    random: impl FnOnce() -> u16,
) -> u16 {
    if pid != 1 {
        return pid as u16;
    }
    match cpuset() {
        Some(bytes) if bytes.len() > 1 => {
            #[cfg(feature = "tracing")]
            tracing::debug!("pid 1, deriving process id from container cpuset");
            crc32(&bytes) as u16
        }
        _ => {
            #[cfg(feature = "tracing")]
            tracing::debug!("pid 1 without cpuset, using random process id");
            random()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_pid_is_truncated() {
        let never = || -> u16 { unreachable!() };
        assert_eq!(process_id_from(4242, || unreachable!(), never), 4242);
        assert_eq!(process_id_from(0x0001_2345, || unreachable!(), never), 0x2345);
    }

    #[test]
    fn container_init_uses_cpuset_checksum() {
        let cpuset = b"/docker/3f2c\n".to_vec();
        let expected = crc32(&cpuset) as u16;
        assert_eq!(
            process_id_from(1, || Some(cpuset), || unreachable!()),
            expected
        );
    }

    #[test]
    fn container_init_without_cpuset_is_random() {
        assert_eq!(process_id_from(1, || None, || 0x1234), 0x1234);
        // A single byte names no cgroup.
        assert_eq!(process_id_from(1, || Some(b"/".to_vec()), || 0xBEEF), 0xBEEF);
        assert_ne!(crc32(b"/") as u16, 0xBEEF);
    }

    #[test]
    fn resolves_current_process() {
        let pid = std::process::id();
        if pid != 1 {
            assert_eq!(resolve_process_id(), pid as u16);
        }
    }
}
