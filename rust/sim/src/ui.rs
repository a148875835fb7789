//! Operator-facing text for the simulation prompt.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

pub fn write_greeting(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Simulate some poker? Y or N")
}

pub fn write_confirmed(out: &mut dyn Write, answer: &str) -> std::io::Result<()> {
    writeln!(out, "\n ### You said {}! Let's go! ### ", answer)?;
    writeln!(out, "\nHow many games to simulate?\n")
}

pub fn write_launching(out: &mut dyn Write, count: usize) -> std::io::Result<()> {
    writeln!(
        out,
        "\n ### You asked me to simulate {} games. Let's... GO? ### ",
        count
    )?;
    for ordinal in 1..=count {
        writeln!(out, "Starting simulation: {}", ordinal)?;
    }
    Ok(())
}

pub fn write_refusal(out: &mut dyn Write, count: u64) -> std::io::Result<()> {
    writeln!(
        out,
        "\n ### You asked me to simulate {} games dude... No way. Pick another number, or quit with Exit. ### ",
        count
    )
}

pub fn write_unknown(out: &mut dyn Write, input: &str) -> std::io::Result<()> {
    writeln!(out, "\n ### You asked me to {} ### ", input)?;
    writeln!(out, "I don't know how to {}", input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn launching_numbers_each_simulation() {
        let text = render(|out| write_launching(out, 2));
        assert!(text.contains("simulate 2 games"));
        assert!(text.contains("Starting simulation: 1\nStarting simulation: 2\n"));
    }

    #[test]
    fn refusal_points_at_exit() {
        let text = render(|out| write_refusal(out, 25));
        assert!(text.contains("25 games"));
        assert!(text.contains("No way. Pick another number, or quit with Exit."));
    }

    #[test]
    fn error_prefix() {
        assert_eq!(render(|err| write_error(err, "boom")), "Error: boom\n");
    }
}
