#![no_main]

use frt_runtime::{EnvironmentSource, ExecutionEnvironment};
use libfuzzer_sys::fuzz_target;

// First nul-separated chunk is the argument list (split on 0x01), the rest
// are raw environment entries.
fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let mut chunks = data.split(|&b| b == 0);
    let arguments: Vec<Vec<u8>> = chunks
        .next()
        .unwrap_or_default()
        .split(|&b| b == 1)
        .map(<[u8]>::to_vec)
        .collect();
    let entries: Vec<Vec<u8>> = chunks.map(<[u8]>::to_vec).collect();

    let env = ExecutionEnvironment::new(arguments.clone(), entries, EnvironmentSource::Captured);

    assert_eq!(env.arguments(), arguments.as_slice());
    assert_eq!(env.argument_count(), arguments.len().saturating_sub(1));
    for (name, _) in env.variables() {
        assert!(!name.is_empty());
        assert!(!name.contains(&b'='));
        assert!(env.var(name).is_some());
    }
    assert!(env.config().list_directed_line_length > 0);
});
