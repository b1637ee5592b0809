#![no_main]
use libfuzzer_sys::fuzz_target;
use svclog::{Context, INFO, Value, time};

fuzz_target!(|data: &str| {
    // Split the input into alternating keys and values
    let pairs: Vec<Value> = data.split('|').map(Value::from).collect();
    let ctx = Context::builder().service("fuzz").time(time::fixed(0)).build();

    let line = INFO.add(pairs).msg(data);
    let out = line.render_in(&ctx);

    // Every record must be valid JSON with the message intact
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("record is not JSON");
    assert_eq!(parsed["msg"], data);
});
