pub fn execute() -> String {
    [
        "📖 EscoBANKS commands",
        "",
        "🎯 Session",
        "  login <username> <password>",
        "  register <name> <username> <email> <password> <confirm> [birthday] [mobile]",
        "  logout | quit",
        "",
        "💰 Account",
        "  dashboard (dash, home)          balance, profile and recent transactions",
        "  dash sort <date|type|receiver|amount> | dash next | dash prev",
        "  balance (bal)",
        "",
        "💸 Money",
        "  deposit <amount> | withdraw <amount> | send <account> <amount>",
        "  confirm | dismiss               finish or abandon the pending action",
        "  request <account> <amount>      ask another account for money",
        "",
        "📬 Money requests",
        "  requests (inbox) | accept <id> | cancel <id>",
        "",
        "📋 Transactions",
        "  tx | tx type <deposit|withdrawal|transfer|canceled|all>",
        "  tx from <YYYY-MM-DD> | tx to <YYYY-MM-DD> | tx clear | tx mine",
        "  tx sort <date|type|receiver|amount> [asc|desc] | tx next | tx prev | tx page <n>",
        "",
        "🏦 Accounts (admin)",
        "  accounts | accounts search <text> | accounts role <ADMIN|USER|all>",
        "  accounts sort <balance|date> [asc|desc] | accounts flip",
        "  accounts next | accounts prev | accounts page <n> | accounts open <user id>",
    ]
    .join("\n")
}
