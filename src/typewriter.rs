// Typewriter effect: types a role one character at a time, holds it,
// deletes it, then moves on to the next role

pub const TYPE_DELAY_MS: u32 = 100;
pub const DELETE_DELAY_MS: u32 = 50;
pub const HOLD_DELAY_MS: u32 = 2000;
pub const NEXT_ROLE_DELAY_MS: u32 = 500;

pub const DEFAULT_ROLES: [&str; 3] = ["Software Developer", "Web Developer", "Problem Solver"];

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<String>,
    role_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new<I, S>(roles: I) -> Typewriter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Typewriter {
            roles: roles.into_iter().map(Into::into).collect(),
            role_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    pub fn tick(&mut self) -> Tick {
        let role = match self.roles.get(self.role_index) {
            Some(role) => role,
            None => {
                return Tick {
                    text: String::new(),
                    delay_ms: TYPE_DELAY_MS,
                }
            }
        };
        let len = role.chars().count();

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            DELETE_DELAY_MS
        } else {
            self.char_index = (self.char_index + 1).min(len);
            TYPE_DELAY_MS
        };
        let text: String = role.chars().take(self.char_index).collect();

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            delay_ms = HOLD_DELAY_MS;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
            delay_ms = NEXT_ROLE_DELAY_MS;
        }

        Tick { text, delay_ms }
    }
}
