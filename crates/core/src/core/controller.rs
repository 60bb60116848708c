//! Page state and the transitions driven by mount, input and calculate.

use tracing::{debug, error, warn};

use crate::bound::BoundFunction;
use crate::float_fmt::fmt_number;
use crate::input::{parse_digits, DigitsInput};
use crate::loader::LoadError;

/// Blocking prompt shown when calculate is pressed with an empty field.
pub const MISSING_INPUT_PROMPT: &str = "Please Enter both Numbers";

/// Module initialization lifecycle. `Ready` and `Error` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    First,
    Second,
}

impl InputField {
    pub fn all() -> &'static [InputField] {
        &[InputField::First, InputField::Second]
    }

    pub fn name(self) -> &'static str {
        match self {
            InputField::First => "num1",
            InputField::Second => "num2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculateOutcome {
    Computed(f64),
    /// At least one field is unset; the caller should prompt the user.
    MissingInput,
    /// No function is bound yet. Only logged.
    NotReady,
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: LoadState,
    load_started: bool,
    add: Option<BoundFunction>,
    num1: Option<DigitsInput>,
    num2: Option<DigitsInput>,
    result: Option<f64>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount trigger. Returns `true` only for the first call; the caller starts
    /// the module load exactly when this returns `true`.
    pub fn begin_load(&mut self) -> bool {
        if self.load_started {
            return false;
        }
        self.load_started = true;
        self.state = LoadState::Loading;
        true
    }

    /// Records the loader's outcome. Ignored once the state is terminal.
    pub fn finish_load(&mut self, outcome: Result<BoundFunction, LoadError>) {
        if self.state != LoadState::Loading {
            warn!(state = ?self.state, "module load finished after the state became terminal; ignoring");
            return;
        }
        match outcome {
            Ok(f) => {
                self.add = Some(f);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = ?e, "WASM module failed to load");
                self.state = LoadState::Error(e.user_message());
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn bound_function(&self) -> Option<&BoundFunction> {
        self.add.as_ref()
    }

    /// Whether the calculate action is enabled.
    pub fn can_calculate(&self) -> bool {
        self.add.is_some()
    }

    fn field(&self, field: InputField) -> Option<&DigitsInput> {
        match field {
            InputField::First => self.num1.as_ref(),
            InputField::Second => self.num2.as_ref(),
        }
    }

    pub fn input(&self, field: InputField) -> Option<f64> {
        self.field(field).map(DigitsInput::value)
    }

    /// Text the field should display: the last accepted digits.
    pub fn input_text(&self, field: InputField) -> String {
        self.field(field)
            .map(|d| d.text().to_string())
            .unwrap_or_default()
    }

    /// Input-change trigger. A rejected keystroke leaves the stored value as it
    /// was and returns `false`.
    pub fn set_input(&mut self, field: InputField, raw: &str) -> bool {
        let value = match parse_digits(raw) {
            Ok(v) => v,
            Err(e) => {
                debug!(field = field.name(), raw, reason = %e, "keystroke rejected");
                return false;
            }
        };
        match field {
            InputField::First => self.num1 = value,
            InputField::Second => self.num2 = value,
        }
        true
    }

    /// Calculate trigger.
    pub fn calculate(&mut self) -> CalculateOutcome {
        let (Some(a), Some(b)) = (self.input(InputField::First), self.input(InputField::Second))
        else {
            return CalculateOutcome::MissingInput;
        };
        let Some(add) = &self.add else {
            warn!("WASM 'add' function not loaded yet");
            return CalculateOutcome::NotReady;
        };

        let sum = add.call(a, b);
        self.result = Some(sum);
        self.num1 = None;
        self.num2 = None;
        CalculateOutcome::Computed(sum)
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn result_text(&self) -> Option<String> {
        self.result.map(fmt_number)
    }
}
