//! Turtle and N-Triples implementation on top of rio

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::namespace::xsd_string;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

/// Turtle reader/writer
pub struct TurtleCodec;

impl TurtleCodec {
    /// Parse Turtle string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        collect_triples(TurtleParser::new(&mut reader, None))
    }

    /// Serialize Triples to Turtle string
    pub fn serialize<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);
        for triple in triples {
            write_triple(&mut formatter, triple)?;
        }
        formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// N-Triples reader/writer
pub struct NTriplesCodec;

impl NTriplesCodec {
    /// Parse N-Triples string to Triples
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        collect_triples(NTriplesParser::new(&mut reader))
    }

    /// Serialize Triples to N-Triples string
    pub fn serialize<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = NTriplesFormatter::new(&mut output);
        for triple in triples {
            write_triple(&mut formatter, triple)?;
        }
        formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

fn collect_triples<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();
    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        let subject = convert_subject(t.subject).map_err(invalid_data)?;
        let predicate = convert_predicate(t.predicate).map_err(invalid_data)?;
        let object = convert_object(t.object).map_err(invalid_data)?;
        triples.push(Triple::new(subject, predicate, object));
        Ok(())
    });

    match res {
        Ok(_) => Ok(triples),
        Err(e) => Err(ParseError::Parse(e.to_string())),
    }
}

fn invalid_data(e: ParseError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
}

fn write_triple<F: TriplesFormatter>(formatter: &mut F, triple: &Triple) -> SerializeResult<()> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };
    let predicate = model::NamedNode {
        iri: triple.predicate.as_str(),
    };

    let datatype;
    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            let literal = if let Some(language) = l.language() {
                model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                }
            } else {
                datatype = l.datatype();
                if datatype == xsd_string() {
                    model::Literal::Simple { value: l.value() }
                } else {
                    model::Literal::Typed {
                        value: l.value(),
                        datatype: model::NamedNode {
                            iri: datatype.as_str(),
                        },
                    }
                }
            };
            model::Term::Literal(literal)
        }
    };

    formatter
        .format(&model::Triple {
            subject,
            predicate,
            object,
        })
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

fn convert_subject(s: model::Subject) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(named(n.iri)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(blank(b.id)?)),
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode) -> ParseResult<RdfPredicate> {
    Ok(named(p.iri)?.into())
}

fn convert_object(o: model::Term) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(named(n.iri)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(blank(b.id)?)),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(Literal::new_simple_literal(value).into())
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            Literal::new_language_tagged_literal(value, language)
                .map(RdfObject::Literal)
                .map_err(|e| ParseError::Parse(e.to_string()))
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            Ok(Literal::new_typed_literal(value, named(datatype.iri)?).into())
        }
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

fn named(iri: &str) -> ParseResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn blank(id: &str) -> ParseResult<BlankNode> {
    BlankNode::with_label(id).map_err(|e| ParseError::Parse(e.to_string()))
}
