
extern crate segwit_addr;

use segwit_addr::{bech32, segwit, Address};

fn do_test(data: &[u8]) {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Ok((hrp, symbols, variant)) = bech32::decode(s) {
        let reser = bech32::encode(&hrp, &symbols, variant).unwrap();
        assert_eq!(s.to_ascii_lowercase(), reser);
    }

    if let Ok(addr) = s.parse::<Address>() {
        assert_eq!(s.to_ascii_lowercase(), addr.to_string());
        let (version, program) = segwit::decode(addr.params().bech_hrp, s).unwrap();
        assert_eq!(version, addr.program().version());
        assert_eq!(program, addr.program().program());
        let script = addr.script_pubkey();
        assert_eq!(Address::from_script(&script, addr.params()), Ok(addr));
    }
}

#[cfg(feature = "afl")]
extern crate afl;
#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use] extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
