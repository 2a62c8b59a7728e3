use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, satisfy},
    combinator::{eof, map, value},
    error::context,
    multi::{many0, separated_list0},
    sequence::preceded,
};
use nom_language::error::VerboseError;

use super::{Segment, Spath};

// ""            - allowed - the whole document
// /foo/bar/baz  - allowed - simple path
// /items/0      - allowed - array index (or a member named "0" on objects)
// /items/-      - allowed - the slot past the last array element
// /a~1b/c~0d    - allowed - escaped '/' and '~' in member names
// /foo//bar     - allowed - empty member name in the middle
// foo/bar       - not allowed, missing leading `/`
// /foo~2        - not allowed, '~' must be followed by '0' or '1'
pub(crate) fn parse_path(input: &str) -> IResult<&str, Spath, VerboseError<&str>> {
    context(
        "expected a path starting with '/' or empty input",
        alt((
            // exactly empty input
            value(Spath { segments: vec![] }, eof),
            // normal path: starts with '/'
            |i| {
                let (rest, segments) =
                    preceded(char('/'), separated_list0(char('/'), parse_segment)).parse(i)?;
                Ok((rest, Spath { segments }))
            },
        )),
    )
    .parse(input)
}

fn parse_segment(input: &str) -> IResult<&str, Segment, VerboseError<&str>> {
    // One decoded char inside a token.
    // - `~` must be escaped (~0 or ~1), so we exclude raw '~' here.
    // - '/' terminates the token.
    let token_char = alt((unescape_json_pointer, satisfy(|c| c != '/' && c != '~')));
    context(
        "segment",
        map(many0(token_char), |chars: Vec<char>| {
            Segment::from_token(chars.into_iter().collect::<String>())
        }),
    )
    .parse(input)
}

fn unescape_json_pointer(input: &str) -> IResult<&str, char, VerboseError<&str>> {
    let (rest, _) = char('~').parse(input)?;
    let (rest, esc) = alt((char('0'), char('1'))).parse(rest)?;

    let decoded_char = match esc {
        '0' => '~',
        _ => '/',
    };

    Ok((rest, decoded_char))
}
