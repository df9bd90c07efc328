//! interactive command loop driving a single bill

pub(crate) mod command;
pub(crate) mod error;

use crate::tab::controller::command::{Command, COMMAND_PROMPT};
use crate::tab::controller::error::SessionError;
use crate::tab::model::bill::Bill;
use crate::tab::storage::BillSink;
use crate::tab::terminal::Terminal;
use crate::tab::util::amount::parse_amount;
use log::{debug, info, warn};

const NAME_PROMPT: &str = "Create bill for: ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    AwaitingCommand,
    Ended { location: String },
}

/// Prompt until a usable bill name is given.
pub(crate) fn open_bill<T: Terminal>(terminal: &mut T) -> Result<Bill, SessionError> {
    loop {
        let name = terminal.prompt(NAME_PROMPT)?.ok_or(SessionError::InputClosed)?;
        match Bill::create(name) {
            Ok(bill) => {
                info!("opened bill={}", bill.name());
                terminal.say(&format!("created the bill for - {}", bill.name()))?;
                return Ok(bill);
            }
            Err(e) => {
                warn!("rejected bill name, {}", e);
                terminal.say(&e.to_string())?;
            }
        }
    }
}

/// One run of the command loop. Holds the only mutable borrow of the bill until it ends.
pub(crate) struct Session<'a, T, S> {
    bill: &'a mut Bill,
    terminal: &'a mut T,
    sink: &'a mut S,
}

impl<'a, T: Terminal, S: BillSink> Session<'a, T, S> {
    pub fn new(bill: &'a mut Bill, terminal: &'a mut T, sink: &'a mut S) -> Self {
        Self {
            bill,
            terminal,
            sink,
        }
    }

    /// Process commands until the bill is saved, returning where it was stored.
    ///
    /// Typing mistakes are reported to the user and the loop keeps going. Failing
    /// to save, losing the input, or a broken terminal end the session with an error
    /// and leave the bill as it was.
    pub fn run(mut self) -> Result<String, SessionError> {
        loop {
            match self.step() {
                Ok(State::AwaitingCommand) => {}
                Ok(State::Ended { location }) => return Ok(location),
                Err(e) if e.is_recoverable() => {
                    warn!("bill={} {}", self.bill.name(), e);
                    self.terminal.say(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read and apply one command, yielding the state to continue from.
    fn step(&mut self) -> Result<State, SessionError> {
        let command: Command = self.read(COMMAND_PROMPT)?.parse()?;
        debug!("bill={} command={}", self.bill.name(), command);
        match command {
            Command::AddItem => self.add_item()?,
            Command::SetTip => self.set_tip()?,
            Command::Save => return self.save().map(|location| State::Ended { location }),
        }
        Ok(State::AwaitingCommand)
    }

    fn add_item(&mut self) -> Result<(), SessionError> {
        self.terminal.say("adding an item")?;
        let name = self.read("Item name - ")?;
        let price = self.read("Item price - ")?;
        let price = parse_amount(&price).map_err(|source| SessionError::InvalidPrice { source })?;
        info!("bill={} item={} price={}", self.bill.name(), name, price);
        self.bill.add_item(name, price);
        self.terminal.say("item added")?;
        Ok(())
    }

    fn set_tip(&mut self) -> Result<(), SessionError> {
        let tip = self.read("Enter tip - ")?;
        let tip = parse_amount(&tip).map_err(|source| SessionError::InvalidTip { source })?;
        info!("bill={} tip={}", self.bill.name(), tip);
        self.bill.set_tip(tip);
        self.terminal.say("tip updated")?;
        Ok(())
    }

    fn save(&mut self) -> Result<String, SessionError> {
        let rendered = self.bill.render();
        let location = self.sink.persist(self.bill.name(), rendered.as_bytes())?;
        info!("bill={} saved to {}", self.bill.name(), location);
        self.terminal.say(&format!("bill saved to {location}"))?;
        Ok(location)
    }

    fn read(&mut self, prompt: &str) -> Result<String, SessionError> {
        self.terminal.prompt(prompt)?.ok_or(SessionError::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::storage::{FailingSink, MemorySink};
    use crate::tab::terminal::Console;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<String>, Vec<u8>>;

    fn console(lines: &[&str]) -> TestConsole {
        let mut input = lines.join("\n");
        input.push('\n');
        Console::new(Cursor::new(input), Vec::new())
    }

    fn output(console: TestConsole) -> String {
        String::from_utf8(console.into_writer()).unwrap()
    }

    #[test]
    fn full_session_saves_rendered_bill() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["a", "Coffee", "3.50", "a", "Cake", "5.00", "t", "1.00", "s"]);
        let mut sink = MemorySink::default();

        let location = Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert_eq!(location, "memory://Alice");
        assert_eq!(bill.items().get("Coffee"), Some(&dec!(3.50)));
        assert_eq!(bill.items().get("Cake"), Some(&dec!(5.00)));
        assert_eq!(bill.tip(), dec!(1.00));
        assert_eq!(bill.total(), dec!(9.50));
        assert_eq!(sink.saved.len(), 1);
        let (name, text) = &sink.saved[0];
        assert_eq!(name, "Alice");
        assert_eq!(text, &bill.render());
        assert!(text.contains("Coffee:"));
        assert!(text.contains("Cake:"));
        assert!(text.contains("...1.00 Rupees"));
        assert!(text.contains("...9.50 Rupees"));
        assert!(output(terminal).ends_with("bill saved to memory://Alice\n"));
    }

    #[test]
    fn invalid_option_keeps_prompting() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["x", "", "s"]);
        let mut sink = MemorySink::default();

        Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert!(bill.items().is_empty());
        assert_eq!(bill.tip(), Decimal::ZERO);
        let out = output(terminal);
        assert_eq!(out.matches("not a valid option").count(), 2);
        assert_eq!(out.matches(COMMAND_PROMPT).count(), 3);
    }

    #[test]
    fn bad_price_adds_nothing() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["a", "Coffee", "abc", "s"]);
        let mut sink = MemorySink::default();

        Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert!(bill.items().is_empty());
        assert!(output(terminal).contains("price is not a number"));
    }

    #[test]
    fn bad_tip_keeps_previous_tip() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["t", "free", "t", "2", "t", "lots", "s"]);
        let mut sink = MemorySink::default();

        Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert_eq!(bill.tip(), dec!(2));
        assert_eq!(output(terminal).matches("tip must be a number").count(), 2);
    }

    #[test]
    fn repeated_item_overwrites_price() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["a", "Coffee", "3.50", "a", "Coffee", "4.00", "s"]);
        let mut sink = MemorySink::default();

        Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert_eq!(bill.items().len(), 1);
        assert_eq!(bill.items().get("Coffee"), Some(&dec!(4.00)));
    }

    #[test]
    fn failed_save_surfaces_and_keeps_bill() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["a", "Coffee", "3.50", "s"]);
        let mut sink = FailingSink::new(1);

        let err = Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap_err();

        assert!(matches!(err, SessionError::Storage { .. }));
        assert_eq!(sink.attempts, 1);
        assert!(sink.inner.saved.is_empty());
        assert_eq!(bill.items().get("Coffee"), Some(&dec!(3.50)));
    }

    #[test]
    fn end_of_input_closes_session() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = Console::new(Cursor::new("t\n".to_string()), Vec::new());
        let mut sink = MemorySink::default();

        let err = Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap_err();

        assert!(matches!(err, SessionError::InputClosed));
        assert_eq!(bill.tip(), Decimal::ZERO);
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn commands_after_save_are_not_read() {
        let mut bill = Bill::create("Alice").unwrap();
        let mut terminal = console(&["s", "a", "Coffee", "1"]);
        let mut sink = MemorySink::default();

        Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

        assert!(bill.items().is_empty());
        assert_eq!(sink.saved.len(), 1);
    }

    #[test]
    fn open_bill_prompts_until_name_is_usable() {
        let mut terminal = console(&["", "../x", "Alice"]);

        let bill = open_bill(&mut terminal).unwrap();

        assert_eq!(bill.name(), "Alice");
        let out = output(terminal);
        assert_eq!(out.matches(NAME_PROMPT).count(), 3);
        assert!(out.contains("bill name must not be empty"));
        assert!(out.ends_with("created the bill for - Alice\n"));
    }

    #[test]
    fn open_bill_stops_at_end_of_input() {
        let mut terminal = Console::new(Cursor::new(String::new()), Vec::new());
        assert!(matches!(open_bill(&mut terminal), Err(SessionError::InputClosed)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a price or tip that does not parse leaves the bill untouched.
            #[test]
            fn unparsable_amounts_never_mutate(
                item in "[A-Za-z]{1,10}",
                price in "[A-Za-z][A-Za-z ,_]{0,8}",
                tip in "[A-Za-z][A-Za-z ,_]{0,8}",
            ) {
                let mut bill = Bill::create("Prop").unwrap();
                bill.add_item("Coffee", dec!(3.50));
                bill.set_tip(dec!(1));
                let before = bill.clone();
                let lines = ["a", item.as_str(), price.as_str(), "t", tip.as_str(), "s"];
                let mut terminal = console(&lines);
                let mut sink = MemorySink::default();

                Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

                prop_assert_eq!(&bill, &before);
                let out = output(terminal);
                prop_assert!(out.contains("price is not a number"));
                prop_assert!(out.contains("tip must be a number"));
                prop_assert_eq!(sink.saved.len(), 1);
            }

            /// Property: whatever is typed at the command prompt, only `s` ends the session.
            #[test]
            fn unknown_commands_keep_prompting(
                tokens in prop::collection::vec("[b-ru-z0-9]{0,3}", 0..10),
            ) {
                let mut bill = Bill::create("Prop").unwrap();
                let mut lines: Vec<&str> = tokens.iter().map(String::as_str).collect();
                lines.push("s");
                let mut terminal = console(&lines);
                let mut sink = MemorySink::default();

                Session::new(&mut bill, &mut terminal, &mut sink).run().unwrap();

                prop_assert!(bill.items().is_empty());
                prop_assert_eq!(bill.tip(), Decimal::ZERO);
                let out = output(terminal);
                prop_assert_eq!(out.matches("not a valid option").count(), tokens.len());
            }
        }
    }
}
