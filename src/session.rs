//! Interactive loop: prompt, read a token, feed it to the registry, and
//! print the report once the user is done.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::registry::Registry;

/// Splits the input into whitespace separated tokens, reading a line only
/// when the previous one is used up.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Tokens {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            // Bytes that are not UTF-8 become replacement characters, so a
            // garbled token is rejected like any other malformed one.
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&buf);
            trace!(line = line.trim_end(), "read line");
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// Runs one session until an exit word or end of input, then writes the
/// report. Rejected tokens get exactly one message each.
pub fn run<R, W>(input: R, mut output: W, config: &Config) -> io::Result<Registry>
where
    R: BufRead,
    W: Write,
{
    let mut tokens = Tokens::new(input);
    let mut registry = Registry::new();
    info!("session started");
    loop {
        if let Some(prompt) = &config.prompt {
            writeln!(output, "{}", prompt)?;
            output.flush()?;
        }
        let token = match tokens.next_token()? {
            Some(token) => token,
            None => {
                debug!("end of input");
                break;
            }
        };
        if config.is_exit(&token) {
            break;
        }
        match registry.submit(&token) {
            Ok(class) => debug!(address = %token, %class, "accepted"),
            Err(e) => {
                debug!(address = %token, reason = ?e, "rejected");
                writeln!(output, "{}", e)?;
            }
        }
    }
    write!(output, "{}", registry.report())?;
    output.flush()?;
    info!(addresses = registry.len(), "session finished");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROMPT;
    use crate::ipv4::NetworkClass;

    fn quiet() -> Config {
        Config {
            prompt: None,
            ..Config::default()
        }
    }

    fn session(input: &str, config: &Config) -> (String, Registry) {
        let mut output = Vec::new();
        let registry = run(input.as_bytes(), &mut output, config).unwrap();
        (String::from_utf8(output).unwrap(), registry)
    }

    #[test]
    fn some_tests() {
        let (output, registry) = session(
            "10.1.2.3\n127.0.0.1   10.1.2.3\n192.168.1.254\nexit\n9.9.9.9\n",
            &quiet(),
        );
        assert_eq!(
            "The network ID cannot start with 127\n\
             That IP address was already assigned\n\
             \n== Results ==\n\
             Network A\n- 10.1.2.3\n\
             Network B\n\
             Network C\n- 192.168.1.254\n",
            output
        );
        assert_eq!(2, registry.len());
    }

    #[test]
    fn one_message_per_rejection() {
        let (output, registry) = session(
            "1.2.3 10.0.0.0 10.255.255.255 230.1.1.1 salir",
            &quiet(),
        );
        let messages: Vec<&str> = output.lines().take_while(|l| !l.is_empty()).collect();
        assert_eq!(
            vec![
                "That does not look like a valid IP address",
                "The host ID numbers cannot all be 0",
                "The host ID numbers cannot all be 255",
                "The address does not belong to class A, B or C",
            ],
            messages
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn prompts_and_end_of_input() {
        let (output, registry) = session("172.16.0.1 9.1.1.1\n\n", &Config::default());
        assert_eq!(3, output.matches(PROMPT).count());
        assert!(output.ends_with(
            "\n== Results ==\nNetwork A\n- 9.1.1.1\nNetwork B\n- 172.16.0.1\nNetwork C\n"
        ));
        assert_eq!(
            vec!["172.16.0.1"],
            registry.report().addresses(NetworkClass::B)
        );
    }

    #[test]
    fn invalid_utf8_is_rejected_per_token() {
        let mut output = Vec::new();
        let registry = run(
            &b"10.1.2.3\n\xff\xfe\n192.168.1.254\n exit"[..],
            &mut output,
            &quiet(),
        )
        .unwrap();
        assert_eq!(
            "That does not look like a valid IP address\n\
             \n== Results ==\n\
             Network A\n- 10.1.2.3\n\
             Network B\n\
             Network C\n- 192.168.1.254\n",
            String::from_utf8(output).unwrap()
        );
        assert_eq!(2, registry.len());
    }

    #[test]
    fn extra_exit_word() {
        let mut config = quiet();
        config.exit_words.push("quit".to_owned());
        let (_, registry) = session("10.1.1.1 quit 10.2.2.2", &config);
        assert_eq!(1, registry.len());
    }
}
