// Interactive Mode
// Line-oriented menu session; reads choices from any BufRead so it can be scripted

use std::io::{BufRead, Write};

use anyhow::Context;
use log::debug;

use crate::rsa::keygen::{generate_keypair, RsaKeyPair};
use crate::rsa::{decrypt_hex, decrypt_string, encrypt_hex, encrypt_string, RsaBigInt};

// Session state for the menu loop
struct Session {
    keypair: RsaKeyPair,
    bits: u64,
}

const MENU: &str = "\nOptions:
1. Encrypt a message
2. Decrypt a message (ciphertext blocks as decimal integers)
3. Generate new key pair
4. Show current public key
5. Encrypt a message to hex blocks
6. Decrypt hex blocks
7. Exit";

/// Read one line after printing `label`; None at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> anyhow::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn parse_blocks(line: &str) -> anyhow::Result<Vec<RsaBigInt>> {
    line.split_whitespace()
        .map(|word| {
            word.parse::<RsaBigInt>()
                .with_context(|| format!("'{}' is not a decimal integer", word))
        })
        .collect()
}

fn render_blocks<T: ToString>(blocks: &[T]) -> String {
    blocks.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

pub fn run_interactive<R: BufRead, W: Write>(mut input: R, out: &mut W, bits: u64) -> anyhow::Result<()> {
    writeln!(out, "Generating {}-bit key pair for interactive use...", bits)?;
    let keypair = generate_keypair(bits).with_context(|| format!("generating {}-bit key pair", bits))?;
    let mut session = Session { keypair, bits };

    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, out, "\nEnter your choice (1-7): ")? else {
            break;
        };
        debug!("interactive choice {:?}", choice);

        match choice.trim() {
            "1" => {
                let Some(message) = prompt(&mut input, out, "Enter message to encrypt: ")? else {
                    break;
                };
                match encrypt_string(&message, &session.keypair.public_key) {
                    Ok(blocks) => writeln!(out, "Encrypted message: {}", render_blocks(&blocks))?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "2" => {
                let Some(line) = prompt(&mut input, out, "Enter ciphertext blocks: ")? else {
                    break;
                };
                let result = parse_blocks(&line).and_then(|blocks| {
                    decrypt_string(&blocks, &session.keypair.private_key).map_err(Into::into)
                });
                match result {
                    Ok(text) => writeln!(out, "Decrypted message: '{}'", text)?,
                    Err(e) => writeln!(out, "Error: {:#}", e)?,
                }
            }
            "3" => {
                let Some(line) = prompt(&mut input, out, "Enter key size in bits: ")? else {
                    break;
                };
                let requested = if line.trim().is_empty() {
                    Ok(session.bits)
                } else {
                    line.trim().parse::<u64>()
                };
                match requested {
                    Ok(bits) => match generate_keypair(bits) {
                        Ok(keypair) => {
                            session = Session { keypair, bits };
                            writeln!(out, "New key pair generated!")?;
                        }
                        Err(e) => writeln!(out, "Error: {}", e)?,
                    },
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "4" => {
                writeln!(out, "Public key (n, e):")?;
                writeln!(out, "n = {}", session.keypair.public_key.n())?;
                writeln!(out, "e = {}", session.keypair.public_key.e())?;
            }
            "5" => {
                let Some(message) = prompt(&mut input, out, "Enter message to encrypt: ")? else {
                    break;
                };
                writeln!(out, "Hex encoded message: {}", hex::encode(message.as_bytes()))?;
                match encrypt_hex(&message, &session.keypair.public_key) {
                    Ok(blocks) => writeln!(out, "Encrypted hex blocks: {}", render_blocks(&blocks))?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "6" => {
                let Some(line) = prompt(&mut input, out, "Enter hex ciphertext blocks: ")? else {
                    break;
                };
                let blocks: Vec<&str> = line.split_whitespace().collect();
                match decrypt_hex(&blocks, &session.keypair.private_key) {
                    Ok(text) => writeln!(out, "Decrypted message: '{}'", text)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "7" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let mut out = Vec::new();
        run_interactive(Cursor::new(script.to_string()), &mut out, 128).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_exit_and_invalid_choice() {
        let text = run_script("9\n7\n");
        assert!(text.contains("Invalid choice"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let text = run_script("4\n");
        assert!(text.contains("e = 65537"));
    }

    #[test]
    fn test_decrypt_garbage_reports_error() {
        let text = run_script("2\nnot-a-number\n7\n");
        assert!(text.contains("Error: 'not-a-number' is not a decimal integer"));
    }

    #[test]
    fn test_parse_and_render_blocks() {
        let blocks = parse_blocks(" 12  3233 7 ").unwrap();
        assert_eq!(render_blocks(&blocks), "12 3233 7");
        assert!(parse_blocks("12 -3").is_err());
    }
}
