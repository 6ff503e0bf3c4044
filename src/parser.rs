use nom::bytes::complete::{tag_no_case, take_till1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, rest};
use nom::number::complete::double;
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;

use crate::error::Error;

pub(crate) const DEPTH_MARKER: &str = "maxdepth_";

fn depth_key_value(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        tag_no_case(DEPTH_MARKER),
        separated_pair(take_till1(|c: char| c == '='), char('='), rest),
    )(input)
}

fn depth_value(input: &str) -> IResult<&str, f64> {
    all_consuming(delimited(multispace0, double, multispace0))(input)
}

/// Parse a `##maxDepth_<CHROM>=<value>` header directive.
///
/// Returns `None` for lines that carry no directive at all. The marker is matched
/// case-insensitively, the chromosome keeps the case it has in the line.
pub(crate) fn depth_directive(line: &str) -> Option<Result<(&str, f64), Error>> {
    // ASCII lowercasing keeps byte offsets intact
    let start = line.to_ascii_lowercase().find(DEPTH_MARKER)?;
    let malformed = |reason| Error::MalformedDepthDirective {
        line: line.into(),
        reason,
    };
    let directive = match depth_key_value(&line[start..]) {
        Ok((_, (chrom, _))) if chrom.trim().is_empty() => Err(malformed("empty chromosome")),
        Ok((_, (chrom, value))) => depth_value(value)
            .map_err(|_| malformed("depth is not a number"))
            .and_then(|(_, depth)| {
                if depth.is_finite() && depth > 0.0 {
                    Ok((chrom.trim(), depth))
                } else {
                    Err(malformed("depth must be positive"))
                }
            }),
        Err(_) => Err(malformed("expected maxDepth_<CHROM>=<depth>")),
    };
    Some(directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_directive() {
        let (chrom, depth) = depth_directive("##maxDepth_chr1=123.5").unwrap().unwrap();
        assert_eq!(chrom, "chr1");
        assert_eq!(depth, 123.5);

        let (chrom, depth) = depth_directive("##MAXDEPTH_Chr2 = 40\n").unwrap().unwrap();
        assert_eq!(chrom, "Chr2");
        assert_eq!(depth, 40.0);
    }

    #[test]
    fn test_lines_without_directive() {
        assert!(depth_directive("##fileformat=VCFv4.1").is_none());
        assert!(depth_directive("#CHROM\tPOS\tID").is_none());
    }

    #[test]
    fn test_malformed_directive() {
        for line in &[
            "##maxDepth_chr1=deep",
            "##maxDepth_chr1",
            "##maxDepth_=12",
            "##maxDepth_ =12",
            "##maxDepth_chr1=0",
            "##maxDepth_chr1=-3",
            "##maxDepth_chr1=inf",
            "##maxDepth_chr1=12 13",
        ] {
            assert!(
                matches!(
                    depth_directive(line),
                    Some(Err(Error::MalformedDepthDirective { .. }))
                ),
                "{}",
                line
            );
        }
    }
}
