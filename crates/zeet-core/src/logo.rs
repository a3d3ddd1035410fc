//! ZEET banner art

/// Banner drawn above the typewriter line on the splash screen
pub const ZEET_LOGO: &str = r"
  ______     ______     ______     ______
/\___  \   /\  ___\   /\  ___\   /\__  _\
\/_/  /__  \ \  __\   \ \  __\   \/_/\ \/
  /\_____\  \ \_____\  \ \_____\    \ \_\
 \/_____/   \/_____/   \/_____/     \/_/
 -----------------------------------------
    ...             /////////////////////////////
";

/// Split the logo into owned banner lines, dropping the surrounding blank lines
pub fn logo_lines() -> Vec<String> {
    ZEET_LOGO
        .trim_matches('\n')
        .lines()
        .map(|line| line.to_string())
        .collect()
}
