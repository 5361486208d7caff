use std::io::BufRead;

/// One recorded measurement: an iteration count and the nanoseconds the run
/// took
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub iterations: u64,
    pub nanoseconds: u64,
}

/// Parses `"<iterations> <nanoseconds>"` rows, one per line. Lines that do
/// not hold exactly two base 10 integers are skipped.
pub fn parse(on: impl BufRead) -> std::io::Result<Vec<Row>> {
    let mut rows = Vec::new();

    for line in on.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let (Some(iterations), Some(nanoseconds)) = (fields.next(), fields.next()) else {
            continue;
        };
        if fields.next().is_some() {
            continue;
        }
        let Ok(iterations) = iterations.parse() else {
            continue;
        };
        let Ok(nanoseconds) = nanoseconds.parse() else {
            continue;
        };
        rows.push(Row { iterations, nanoseconds });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_parse_rows() {
        let rows = parse("100 2500\n200 4800\n".as_bytes()).unwrap();
        assert_eq!(rows, vec![
            Row { iterations: 100, nanoseconds: 2500 },
            Row { iterations: 200, nanoseconds: 4800 },
        ]);
    }

    #[test]
    fn check_skips_lines_without_two_integers() {
        let content = "\n100 2500\niterations nanoseconds\n300\n400 10 20\n-5 80\n200 4800\n";
        let rows = parse(content.as_bytes()).unwrap();
        assert_eq!(rows, vec![
            Row { iterations: 100, nanoseconds: 2500 },
            Row { iterations: 200, nanoseconds: 4800 },
        ]);
    }

    #[test]
    fn check_empty_input() {
        assert_eq!(parse("".as_bytes()).unwrap(), Vec::new());
    }
}
