use icalstream::{ParserOptions, types::Tz};

fn utc_options() -> ParserOptions {
    ParserOptions {
        default_timezone: Tz::UTC,
        ..Default::default()
    }
}

pub mod lexer {
    use icalstream::parser::{Lexer, TokenKind, unfold};

    #[test]
    fn lex_everything() {
        let input = include_str!("./resources/events.ics");
        let unfolded = unfold(input);
        let tokens = Lexer::new(&unfolded)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        let line_ends = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::LineEnd)
            .count();
        // One line is folded
        assert_eq!(line_ends, input.matches("\r\n").count() - 1);
        // Every token is a slice of the unfolded input at its position
        for token in &tokens {
            assert_eq!(&unfolded[token.pos..token.pos + token.text.len()], token.text);
        }
    }

    #[test]
    fn delimiters_in_order() {
        let input = include_str!("./resources/events.ics");
        let unfolded = unfold(input);
        let delimiters = Lexer::new(&unfolded)
            .map(Result::unwrap)
            .filter_map(|token| token.delimiter())
            .map(|delimiter| delimiter.to_string())
            .collect::<Vec<_>>();
        similar_asserts::assert_eq!(
            delimiters,
            [
                "BEGIN:VCALENDAR",
                "BEGIN:VEVENT",
                "BEGIN:VALARM",
                "END:VALARM",
                "END:VEVENT",
                "BEGIN:VEVENT",
                "END:VEVENT",
                "END:VCALENDAR",
            ]
        );
    }
}

pub mod parser {
    use crate::utc_options;
    use chrono::{TimeDelta, TimeZone, Utc};
    use icalstream::{
        CalendarParser, ParserError, ParserOptions, component::Component, parse,
        parse_with_options, parser::unfold, types::Tz,
    };
    use rstest::rstest;

    #[test_log::test]
    fn minimal() {
        let input = include_str!("./resources/minimal.ics");
        let cal = parse(input).unwrap();
        assert_eq!(cal.prodid, "-");
        assert_eq!(cal.version, "2.0");
        assert_eq!(cal.calscale, "GREGORIAN");
        assert!(cal.events.is_empty());
        assert_eq!(
            cal.properties
                .iter()
                .map(|prop| prop.name.as_str())
                .collect::<Vec<_>>(),
            ["PRODID", "VERSION"]
        );
    }

    #[test_log::test]
    fn events() {
        let input = include_str!("./resources/events.ics");
        let cal = parse_with_options(input, utc_options()).unwrap();

        assert_eq!(cal.prodid, "-//icalstream//Test Calendar//EN");
        assert_eq!(cal.method, None);
        assert_eq!(cal.get_property("X-WR-CALNAME").unwrap().value, "Team");
        // Unknown components are kept as plain calendar properties
        assert_eq!(
            cal.get_named_properties("BEGIN")
                .map(|prop| prop.value.as_str())
                .collect::<Vec<_>>(),
            ["VTIMEZONE", "STANDARD"]
        );
        assert_eq!(cal.properties.len(), 12);
        assert_eq!(cal.events.len(), 2);

        let standup = &cal.events[0];
        assert_eq!(standup.uid, "standup-1@example.com");
        assert_eq!(standup.summary, "Daily stand-up");
        assert_eq!(
            standup.description,
            "Walk the board\\, then discuss blockers. Long descriptions are folded over several lines."
        );
        assert_eq!(
            standup.dtstart,
            Utc.with_ymd_and_hms(2023, 6, 15, 7, 30, 0).unwrap()
        );
        assert_eq!(
            standup.dtend,
            Some(Tz::UTC.with_ymd_and_hms(2023, 6, 15, 7, 45, 0).unwrap())
        );
        assert_eq!(
            standup.dtstart.timezone(),
            Tz::Olson(chrono_tz::Europe::Berlin)
        );
        let attendee = standup.get_property("ATTENDEE").unwrap();
        assert_eq!(attendee.value, "mailto:jane@example.com");
        assert_eq!(attendee.params.get_param("CN"), Some("Doe, Jane"));
        assert_eq!(attendee.params.get_param("ROLE"), Some("REQ-PARTICIPANT"));

        let alarms = standup.get_alarms();
        assert_eq!(alarms.len(), 1);
        assert_eq!(alarms[0].action, "DISPLAY");
        assert_eq!(alarms[0].trigger, "-PT10M");
        assert_eq!(
            alarms[0].get_property("DESCRIPTION").unwrap().value,
            "Stand-up in 10 minutes"
        );

        let holiday = &cal.events[1];
        assert_eq!(
            holiday.dtstart,
            Utc.with_ymd_and_hms(2023, 8, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(holiday.dtend, Some(holiday.dtstart + TimeDelta::hours(24)));
        assert!(holiday.get_alarms().is_empty());
    }

    #[test]
    fn default_timezone_is_used_for_bare_dates() {
        let input = include_str!("./resources/events.ics");
        let options = ParserOptions {
            default_timezone: Tz::Olson(chrono_tz::America::New_York),
            ..Default::default()
        };
        let cal = parse_with_options(input, options).unwrap();
        assert_eq!(
            cal.events[1].dtstart,
            Utc.with_ymd_and_hms(2023, 8, 15, 4, 0, 0).unwrap()
        );
        // Explicit TZID is not affected
        assert_eq!(
            cal.events[0].dtstart,
            Utc.with_ymd_and_hms(2023, 6, 15, 7, 30, 0).unwrap()
        );
    }

    #[test_log::test]
    fn malformed_dates_are_lenient() {
        let input = include_str!("./resources/publish_malformed_date.ics");
        let cal = parse_with_options(input, utc_options()).unwrap();
        assert_eq!(cal.method.as_deref(), Some("PUBLISH"));
        let event = &cal.events[0];
        assert_eq!(event.dtstamp, None);
        assert_eq!(event.dtend, None);
        assert_eq!(event.summary, "Broken end");
    }

    #[test]
    fn malformed_dates_strict() {
        let input = include_str!("./resources/publish_malformed_date.ics");
        let options = ParserOptions {
            strict_dates: true,
            ..utc_options()
        };
        let err = parse_with_options(input, options).unwrap_err();
        assert!(matches!(err, ParserError::DateTime("DTSTAMP", _)));
    }

    #[rstest]
    #[case(include_str!("./resources/missing_uid.ics"), ParserError::MissingProperty("UID"))]
    #[case(include_str!("./resources/alarm_without_trigger.ics"), ParserError::MissingProperty("TRIGGER"))]
    fn invalid_files(#[case] input: &str, #[case] expected: ParserError) {
        assert_eq!(parse(input).unwrap_err(), expected);
    }

    fn calendar(lines: &[&str]) -> String {
        [
            &["BEGIN:VCALENDAR", "PRODID:-", "VERSION:2.0"][..],
            lines,
            &["END:VCALENDAR"],
        ]
        .concat()
        .join("\r\n")
            + "\r\n"
    }

    #[rstest]
    #[case(&[], "missing required property \"PRODID\"")]
    #[case(&["PRODID:-"], "missing required property \"VERSION\"")]
    #[case(&["PRODID:-", "BEGIN:VEVENT"], "missing required property \"VERSION\"")]
    #[case(&["PRODID:-", "VERSION:2.0", "PRODID:-"], "\"PRODID\" property occurs more than once")]
    fn invalid_calendar_properties(#[case] lines: &[&str], #[case] message: &str) {
        let input = [&["BEGIN:VCALENDAR"][..], lines, &["END:VCALENDAR"]]
            .concat()
            .join("\r\n")
            + "\r\n";
        assert_eq!(parse(&input).unwrap_err().to_string(), message);
    }

    #[rstest]
    #[case(&["DTEND:20230616T120000Z", "DURATION:PT1H"])]
    #[case(&["DURATION:PT1H", "DTEND:20230616T120000Z"])]
    fn dtend_and_duration(#[case] lines: &[&str]) {
        let event = [
            &[
                "BEGIN:VEVENT",
                "UID:abc",
                "DTSTAMP:20230601T080000Z",
                "DTSTART:20230615T120000Z",
            ][..],
            lines,
            &["END:VEVENT"],
        ]
        .concat();
        let err = parse(&calendar(&event)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "property conflict: cannot have both \"DTEND\" and \"DURATION\""
        );
    }

    #[rstest]
    #[case(&["DTSTAMP:20230601T080000Z", "DTSTART:20230615T120000Z"], "missing required property \"UID\"")]
    #[case(&["UID:abc", "DTSTAMP:20230601T080000Z"], "missing required property \"DTSTART\"")]
    #[case(&["UID:abc", "DTSTART:20230615T120000Z"], "missing required property \"DTSTAMP\"")]
    #[case(&["UID:abc", "DTSTAMP:20230601T080000Z", "DTSTART:20230615T120000Z", "DESCRIPTION:a", "DESCRIPTION:b"], "\"DESCRIPTION\" property occurs more than once")]
    fn invalid_events(#[case] lines: &[&str], #[case] message: &str) {
        let event = [&["BEGIN:VEVENT"][..], lines, &["END:VEVENT"]].concat();
        assert_eq!(parse(&calendar(&event)).unwrap_err().to_string(), message);
    }

    #[test]
    fn end_defaults_to_one_day() {
        let input = calendar(&[
            "BEGIN:VEVENT",
            "UID:abc",
            "DTSTAMP:20230601T080000Z",
            "DTSTART:20230615T120000Z",
            "END:VEVENT",
        ]);
        let event = &parse(&input).unwrap().events[0];
        assert_eq!(
            event.dtend,
            Some(Tz::UTC.with_ymd_and_hms(2023, 6, 16, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn start_in_daylight_saving_gap() {
        let input = calendar(&[
            "BEGIN:VEVENT",
            "UID:abc",
            "DTSTAMP:20230301T080000Z",
            "DTSTART;TZID=Europe/Berlin:20230326T023000",
            "END:VEVENT",
        ]);
        let event = &parse(&input).unwrap().events[0];
        assert_eq!(
            event.dtstart,
            Utc.with_ymd_and_hms(2023, 3, 26, 1, 30, 0).unwrap()
        );
        assert_eq!(event.dtstart.format("%H:%M").to_string(), "03:30");
    }

    #[test]
    fn mismatched_end() {
        let input = calendar(&["BEGIN:VEVENT", "UID:abc", "END:VALARM"]);
        assert_eq!(
            parse(&input).unwrap_err(),
            ParserError::Unexpected {
                found: "<END:VALARM>".to_owned(),
                expected: "END:VEVENT",
            }
        );
    }

    #[test]
    fn calendar_properties_after_events() {
        let input = calendar(&[
            "BEGIN:VEVENT",
            "UID:abc",
            "DTSTAMP:20230601T080000Z",
            "DTSTART:20230615T120000Z",
            "END:VEVENT",
            "METHOD:REQUEST",
            "BEGIN:VEVENT",
            "UID:def",
            "DTSTART:20230616T120000Z",
            "END:VEVENT",
        ]);
        let cal = parse(&input).unwrap();
        assert_eq!(cal.method.as_deref(), Some("REQUEST"));
        assert_eq!(cal.events[1].dtstamp, None);
    }

    #[test]
    fn parser_on_unfolded_input() {
        let input = include_str!("./resources/events.ics");
        let unfolded = unfold(input);
        let cal = CalendarParser::new(&unfolded)
            .with_options(utc_options())
            .parse()
            .unwrap();
        assert_eq!(cal, parse_with_options(input, utc_options()).unwrap());
    }
}
