use std::path::Path;

pub const PROFILES: &str = "\
First Name,Last Name,URL,Email Address,Company,Position,Connected On
Ann,Lee,https://l.in/ann,ann@x.io,Acme,PM,02 Feb 2021
Bob,Roe,https://l.in/bob,,Initech,CTO,01 Jan 2020
Cat,Poe,https://l.in/cat,,Globex,Engineer,15 Mar 2019
Dan,Fox,https://l.in/dan
Eve,Kim,https://l.in/eve,,Hooli,Designer,30 Jun 2022
";

pub const PICTURES: &str = "\
profile_url,profile_picture_url
https://l.in/ann,https://img/ann.jpg
https://l.in/eve,https://img/eve.jpg
";

pub const MESSAGES: &str = "\
CONVERSATION ID,CONVERSATION TITLE,FROM,SENDER PROFILE URL,TO,RECIPIENT PROFILE URLS,DATE,SUBJECT,CONTENT,FOLDER,IS MESSAGE DRAFT,IS CONVERSATION DRAFT
c1,,Ann Lee,https://l.in/ann,Me,https://l.in/me,2024-01-01 09:00:00 UTC,,\"Hi, how are you?\",INBOX,No,No
c1,,Me,https://l.in/me,Ann Lee,https://l.in/ann,2024-01-02 10:00:00 UTC,,\"Fine, thanks\",INBOX,No,No
c2,,Me,https://l.in/me,Bob Roe,https://l.in/bob,not a date,,hello,SENT,No,No
";

/// Write the three export files into `dir`
pub fn write_export(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("profiles.csv"), PROFILES).unwrap();
    std::fs::write(dir.join("pictures.csv"), PICTURES).unwrap();
    std::fs::write(dir.join("messages.csv"), MESSAGES).unwrap();
}
