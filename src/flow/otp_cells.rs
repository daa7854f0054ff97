//! Six single-digit OTP input cells.
//!
//! Methods that move the caret return the index of the cell that should take
//! focus next; the page applies it to the matching `<input>`.

#[cfg(test)]
#[path = "otp_cells_test.rs"]
mod otp_cells_test;

pub const OTP_LEN: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OtpCells {
    cells: [Option<char>; OTP_LEN],
}

impl OtpCells {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Cell contents as shown in the input.
    #[must_use]
    pub fn display(&self, index: usize) -> String {
        self.get(index).map(String::from).unwrap_or_default()
    }

    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The entered code, only once every cell is filled.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.cells.iter().copied().collect::<Option<String>>()
    }

    pub fn clear(&mut self) {
        self.cells = [None; OTP_LEN];
    }

    /// Handle an input event on `index`.
    ///
    /// An empty value clears the cell. Non-digit input is ignored. A value of
    /// six or more digits (autofill) is treated as a paste. Otherwise the last
    /// typed digit wins and focus advances.
    pub fn input(&mut self, index: usize, raw: &str) -> Option<usize> {
        if index >= OTP_LEN {
            return None;
        }
        if raw.is_empty() {
            self.cells[index] = None;
            return None;
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if raw.len() >= OTP_LEN {
            return self.paste(raw);
        }
        let digit = raw.chars().last()?;
        self.cells[index] = Some(digit);
        (index + 1 < OTP_LEN).then_some(index + 1)
    }

    /// Backspace on `index`: an empty cell moves focus to the previous one.
    #[must_use]
    pub fn backspace(&self, index: usize) -> Option<usize> {
        if index == 0 || index >= OTP_LEN || self.cells[index].is_some() {
            return None;
        }
        Some(index - 1)
    }

    /// Fill cells left to right from pasted text.
    ///
    /// Surrounding whitespace is ignored; anything else that is not a digit
    /// rejects the paste. Cells past the pasted digits keep their values.
    pub fn paste(&mut self, raw: &str) -> Option<usize> {
        let raw = raw.trim();
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let mut count = 0;
        for (cell, digit) in self.cells.iter_mut().zip(raw.chars()) {
            *cell = Some(digit);
            count += 1;
        }
        Some(count.min(OTP_LEN - 1))
    }

    /// Replace all cells with the leading digits of `digits`.
    ///
    /// Used by voice input, whose transcript is cumulative.
    pub fn fill_from(&mut self, digits: &str) {
        self.clear();
        for (cell, digit) in self.cells.iter_mut().zip(digits.chars().filter(char::is_ascii_digit)) {
            *cell = Some(digit);
        }
    }
}
