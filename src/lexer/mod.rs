pub mod token;

use token::{Token, TokenType, lookup_identifier};

#[derive(Debug, Clone, PartialEq)]
pub struct Lexer {
    input: String,
    curr_position: usize,
    next_read_position: usize,
    curr_char: char, // ASCII input only; '\0' marks end of input
    line: usize,
    column: usize,
}

impl Lexer {
    /// Creates a new Lexer over the given source string and primes the
    /// cursor on the first character.
    pub fn new(input: String) -> Self {
        let mut l = Lexer {
            input,
            curr_position: 0,
            next_read_position: 0,
            curr_char: '\0',
            line: 1,
            column: 0, // Will be 1 after first read_char
        };
        l.read_char();
        l
    }

    /// Advances the cursor by one character, updating the current character
    /// and the line/column bookkeeping used for error spans. At end of
    /// input the current character becomes '\0'.
    fn read_char(&mut self) {
        if self.curr_char == '\n' {
            self.line += 1;
            self.column = 0; // Reset to 0, will be 1 after increment below
        }

        if self.next_read_position >= self.input.len() {
            self.curr_char = '\0';
        } else {
            let (index, character) = self
                .input
                .char_indices()
                .find(|(idx, _)| *idx == self.next_read_position)
                .unwrap();

            self.curr_char = character;
            self.curr_position = index;
        }

        self.column += 1;
        self.next_read_position += self.curr_char.len_utf8();
    }

    /// Returns the next character without advancing the cursor, or '\0'
    /// at end of input.
    fn peek_char(&self) -> char {
        if self.next_read_position >= self.input.len() {
            '\0'
        } else {
            self.input
                .char_indices()
                .find(|(idx, _)| *idx == self.next_read_position)
                .map(|(_, ch)| ch)
                .unwrap()
        }
    }

    /// Skips spaces, tabs and line breaks. Line/column tracking is handled
    /// by read_char.
    fn skip_white_space(&mut self) {
        while self.curr_char.is_ascii_whitespace() {
            self.read_char();
        }
    }

    /// The identifier alphabet is ASCII letters and underscore. Digits are
    /// not admitted, not even after the first character.
    fn is_letter(&self) -> bool {
        self.curr_char.is_ascii_alphabetic() || self.curr_char == '_'
    }

    fn is_digit(&self) -> bool {
        self.curr_char.is_ascii_digit()
    }

    /// Reads an identifier starting at the current position, stopping on
    /// the first character outside the identifier alphabet.
    fn read_identifier(&mut self) -> String {
        let start_position = self.curr_position;
        while self.is_letter() {
            self.read_char();
        }
        let end_position = if self.curr_char == '\0' {
            self.input.len()
        } else {
            self.curr_position
        };
        self.input[start_position..end_position].to_string()
    }

    /// Reads consecutive digits starting at the current position.
    fn read_number(&mut self) -> String {
        let start_position = self.curr_position;
        while self.is_digit() {
            self.read_char();
        }
        let end_position = if self.curr_char == '\0' {
            self.input.len()
        } else {
            self.curr_position
        };
        self.input[start_position..end_position].to_string()
    }

    /// Reads a string literal body. The current character is the opening
    /// quote; on return the current character is the closing quote (or
    /// '\0' if the string is unterminated). No escape sequences are
    /// interpreted.
    fn read_string(&mut self) -> String {
        self.read_char();
        let start_position = if self.curr_char == '\0' {
            self.input.len()
        } else {
            self.curr_position
        };
        while self.curr_char != '"' && self.curr_char != '\0' {
            self.read_char();
        }
        let end_position = if self.curr_char == '\0' {
            self.input.len()
        } else {
            self.curr_position
        };
        self.input[start_position..end_position].to_string()
    }

    /// Gets the current column position.
    /// This is used to capture the starting column for multi-character tokens.
    fn get_column(&self) -> usize {
        self.column
    }

    /// Returns the next token from the input stream.
    ///
    /// Skips whitespace, then dispatches on the current character. The
    /// identifier and number paths stop on the first non-matching
    /// character and return early; every other path advances the cursor
    /// once after building its token.
    pub fn next_token(&mut self) -> Token {
        self.skip_white_space();

        // Capture position before reading token
        let line = self.line;
        let column = self.column;

        let token = match self.curr_char {
            '=' => {
                if self.peek_char() == '=' {
                    let ch = self.curr_char;
                    self.read_char();
                    let literal = format!("{}{}", ch, self.curr_char);
                    Token::new(TokenType::EQ, literal, line, column)
                } else {
                    Token::new(TokenType::ASSIGN, self.curr_char.to_string(), line, column)
                }
            }
            '+' => Token::new(TokenType::PLUS, self.curr_char.to_string(), line, column),
            '-' => Token::new(TokenType::MINUS, self.curr_char.to_string(), line, column),
            '!' => {
                // '!' and '!=' are separate tokens, decided by one lookahead
                if self.peek_char() == '=' {
                    let ch = self.curr_char;
                    self.read_char();
                    let literal = format!("{}{}", ch, self.curr_char);
                    Token::new(TokenType::NOTEQ, literal, line, column)
                } else {
                    Token::new(TokenType::BANG, self.curr_char.to_string(), line, column)
                }
            }
            '/' => Token::new(TokenType::SLASH, self.curr_char.to_string(), line, column),
            '*' => Token::new(
                TokenType::ASTERISK,
                self.curr_char.to_string(),
                line,
                column,
            ),
            '<' => Token::new(TokenType::LT, self.curr_char.to_string(), line, column),
            '>' => Token::new(TokenType::GT, self.curr_char.to_string(), line, column),
            ',' => Token::new(TokenType::COMMA, self.curr_char.to_string(), line, column),
            ';' => Token::new(
                TokenType::SEMICOLON,
                self.curr_char.to_string(),
                line,
                column,
            ),
            '(' => Token::new(TokenType::LPAREN, self.curr_char.to_string(), line, column),
            ')' => Token::new(TokenType::RPAREN, self.curr_char.to_string(), line, column),
            '{' => Token::new(TokenType::LBRACE, self.curr_char.to_string(), line, column),
            '}' => Token::new(TokenType::RBRACE, self.curr_char.to_string(), line, column),
            '[' => Token::new(
                TokenType::LBRACKET,
                self.curr_char.to_string(),
                line,
                column,
            ),
            ']' => Token::new(
                TokenType::RBRACKET,
                self.curr_char.to_string(),
                line,
                column,
            ),
            '"' => {
                let literal = self.read_string();
                Token::new(TokenType::STRING, literal, line, column)
            }
            '\0' => Token::new(TokenType::EOF, "".to_string(), line, column),
            _ => {
                if self.is_letter() {
                    let start_col = self.get_column();
                    let literal = self.read_identifier();
                    let token_type = lookup_identifier(&literal);
                    return Token::new(token_type, literal, line, start_col);
                } else if self.is_digit() {
                    let start_col = self.get_column();
                    let literal = self.read_number();
                    return Token::new(TokenType::INT, literal, line, start_col);
                } else {
                    Token::new(TokenType::ILLEGAL, self.curr_char.to_string(), line, column)
                }
            }
        };
        self.read_char();
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token::TokenType;

    #[test]
    fn test_next_token() {
        let input = r#"let five = 5;
        let ten = 10;
        let add = fn(x, y) {
        x + y;
        };
        let result = add(five, ten);
        !-/*5;
        5 < 10 > 5;
        if (5 < 10) {
        return true;
        } else {
        return false;
        }
        10 == 10;
        10 != 9;
        "foobar"
        "foo bar"
        [1, 2];
        "#
        .to_string();
        let tests = vec![
            (TokenType::LET, "let".to_string()),
            (TokenType::IDENT, "five".to_string()),
            (TokenType::ASSIGN, "=".to_string()),
            (TokenType::INT, "5".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::LET, "let".to_string()),
            (TokenType::IDENT, "ten".to_string()),
            (TokenType::ASSIGN, "=".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::LET, "let".to_string()),
            (TokenType::IDENT, "add".to_string()),
            (TokenType::ASSIGN, "=".to_string()),
            (TokenType::FUNCTION, "fn".to_string()),
            (TokenType::LPAREN, "(".to_string()),
            (TokenType::IDENT, "x".to_string()),
            (TokenType::COMMA, ",".to_string()),
            (TokenType::IDENT, "y".to_string()),
            (TokenType::RPAREN, ")".to_string()),
            (TokenType::LBRACE, "{".to_string()),
            (TokenType::IDENT, "x".to_string()),
            (TokenType::PLUS, "+".to_string()),
            (TokenType::IDENT, "y".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::RBRACE, "}".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::LET, "let".to_string()),
            (TokenType::IDENT, "result".to_string()),
            (TokenType::ASSIGN, "=".to_string()),
            (TokenType::IDENT, "add".to_string()),
            (TokenType::LPAREN, "(".to_string()),
            (TokenType::IDENT, "five".to_string()),
            (TokenType::COMMA, ",".to_string()),
            (TokenType::IDENT, "ten".to_string()),
            (TokenType::RPAREN, ")".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::BANG, "!".to_string()),
            (TokenType::MINUS, "-".to_string()),
            (TokenType::SLASH, "/".to_string()),
            (TokenType::ASTERISK, "*".to_string()),
            (TokenType::INT, "5".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::INT, "5".to_string()),
            (TokenType::LT, "<".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::GT, ">".to_string()),
            (TokenType::INT, "5".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::IF, "if".to_string()),
            (TokenType::LPAREN, "(".to_string()),
            (TokenType::INT, "5".to_string()),
            (TokenType::LT, "<".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::RPAREN, ")".to_string()),
            (TokenType::LBRACE, "{".to_string()),
            (TokenType::RETURN, "return".to_string()),
            (TokenType::TRUE, "true".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::RBRACE, "}".to_string()),
            (TokenType::ELSE, "else".to_string()),
            (TokenType::LBRACE, "{".to_string()),
            (TokenType::RETURN, "return".to_string()),
            (TokenType::FALSE, "false".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::RBRACE, "}".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::EQ, "==".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::INT, "10".to_string()),
            (TokenType::NOTEQ, "!=".to_string()),
            (TokenType::INT, "9".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::STRING, "foobar".to_string()),
            (TokenType::STRING, "foo bar".to_string()),
            (TokenType::LBRACKET, "[".to_string()),
            (TokenType::INT, "1".to_string()),
            (TokenType::COMMA, ",".to_string()),
            (TokenType::INT, "2".to_string()),
            (TokenType::RBRACKET, "]".to_string()),
            (TokenType::SEMICOLON, ";".to_string()),
            (TokenType::EOF, "".to_string()),
        ];
        let mut lex = Lexer::new(input);
        for (i, (expected_type, expected_literal)) in tests.into_iter().enumerate() {
            let token = lex.next_token();
            // Assert that token type matches the expected type
            assert_eq!(
                token.token_type, expected_type,
                "tests[{}] - tokentype wrong. expected={:?}, got={:?}",
                i, expected_type, token.token_type
            );
            // Assert that token literal matches the expected literal
            assert_eq!(
                token.literal, expected_literal,
                "tests[{}] - literaltype wrong. expected={:?}, got={:?}",
                i, expected_literal, token.literal
            )
        }
    }

    #[test]
    fn test_identifiers_exclude_digits() {
        // 'add1' lexes as the identifier 'add' followed by the int '1'
        let mut lex = Lexer::new("add1".to_string());

        let ident = lex.next_token();
        assert_eq!(ident.token_type, TokenType::IDENT);
        assert_eq!(ident.literal, "add");

        let number = lex.next_token();
        assert_eq!(number.token_type, TokenType::INT);
        assert_eq!(number.literal, "1");

        assert_eq!(lex.next_token().token_type, TokenType::EOF);
    }

    #[test]
    fn test_illegal_character() {
        let mut lex = Lexer::new("let x = @;".to_string());
        let expected = vec![
            (TokenType::LET, "let"),
            (TokenType::IDENT, "x"),
            (TokenType::ASSIGN, "="),
            (TokenType::ILLEGAL, "@"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::EOF, ""),
        ];
        for (token_type, literal) in expected {
            let token = lex.next_token();
            assert_eq!(token.token_type, token_type);
            assert_eq!(token.literal, literal);
        }
    }

    #[test]
    fn test_unterminated_string_stops_at_eof() {
        let mut lex = Lexer::new("\"abc".to_string());
        let token = lex.next_token();
        assert_eq!(token.token_type, TokenType::STRING);
        assert_eq!(token.literal, "abc");
        assert_eq!(lex.next_token().token_type, TokenType::EOF);
    }

    #[test]
    fn test_token_positions() {
        let mut lex = Lexer::new("let x = 5;\nx".to_string());

        let let_token = lex.next_token();
        assert_eq!((let_token.line, let_token.column), (1, 1));

        let ident = lex.next_token();
        assert_eq!((ident.line, ident.column), (1, 5));

        lex.next_token(); // =
        lex.next_token(); // 5
        lex.next_token(); // ;

        let second_line = lex.next_token();
        assert_eq!((second_line.line, second_line.column), (2, 1));
    }
}
